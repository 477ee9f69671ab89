use crate::models::audio_models::{Chunk, SampleSequence};

/// Ordered store of captured chunks plus the mono sequence derived from them.
///
/// Chunks are kept in capture order with no deduplication. The derived
/// sequence is whatever the last finalize produced and is dropped on
/// [`clear`](SampleBuffer::clear).
#[derive(Debug, Default)]
pub struct SampleBuffer {
    chunks: Vec<Chunk>,
    samples: Option<SampleSequence>,
    recorded_size: usize,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk to the end of the sequence.
    pub fn append(&mut self, chunk: Chunk) {
        self.recorded_size += chunk.size();
        self.chunks.push(chunk);
    }

    /// Reset chunks, derived samples and recorded size.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.samples = None;
        self.recorded_size = 0;
    }

    /// Current chunks in capture order.
    pub fn snapshot(&self) -> Vec<Chunk> {
        self.chunks.clone()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Total encoded bytes appended since the last clear.
    pub fn recorded_size(&self) -> usize {
        self.recorded_size
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn set_samples(&mut self, samples: SampleSequence) {
        self.samples = Some(samples);
    }

    pub fn samples(&self) -> Option<&SampleSequence> {
        self.samples.as_ref()
    }
}
