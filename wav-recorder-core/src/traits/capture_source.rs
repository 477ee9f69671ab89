use std::sync::Arc;

use async_trait::async_trait;

use crate::models::audio_models::Chunk;
use crate::models::error::RecorderError;

/// Callback invoked for every chunk the capture source emits, in capture order.
pub type ChunkCallback = Arc<dyn Fn(Chunk) + Send + Sync + 'static>;

/// Host microphone capture.
///
/// Implemented by the embedding platform (browser bridge, native recorder,
/// test fakes). Chunks are opaque encoded units that the [`AudioDecoder`]
/// turns into samples.
///
/// [`AudioDecoder`]: super::decoder::AudioDecoder
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Ask the host for microphone access.
    ///
    /// Returns `RecorderError::PermissionDenied` when the user or platform refuses.
    async fn request_permission(&self) -> Result<(), RecorderError>;

    /// Start capturing, delivering chunks via `callback`.
    fn begin_capture(&self, callback: ChunkCallback) -> Result<(), RecorderError>;

    /// Stop capturing. Chunks already emitted stay with the recorder.
    fn end_capture(&self) -> Result<(), RecorderError>;
}
