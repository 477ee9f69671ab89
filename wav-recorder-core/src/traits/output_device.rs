use crate::models::audio_models::SampleSequence;

/// Audio output used for previewing the current recording.
pub trait OutputDevice: Send + Sync {
    /// Start playing `samples` at `sample_rate`. Fire-and-forget.
    fn play_buffer(&self, samples: &SampleSequence, sample_rate: u32);
}
