use crate::models::audio_models::Chunk;
use crate::models::error::RecorderError;
use crate::models::recording_result::Base64Payload;
use crate::models::state::RecorderState;

/// Observer hooks for recording session notifications.
///
/// Hooks return nothing, so a failing observer cannot affect the session.
/// They are called on whatever task drives the session.
pub trait RecorderDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: RecorderState);

    /// Called once per chunk delivered while recording, in buffer order.
    ///
    /// Deliveries are serialized; an implementation must not feed chunks back
    /// into the session from this hook.
    fn on_data_available(&self, chunk: &Chunk);

    /// Called exactly once per successful finalize.
    fn on_stop(&self, payload: &Base64Payload);

    /// Called when a finalize fails.
    fn on_error(&self, error: &RecorderError);
}
