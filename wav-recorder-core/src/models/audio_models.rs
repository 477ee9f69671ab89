use std::sync::Arc;

use super::error::RecorderError;

/// One opaque encoded unit of audio emitted by the capture source.
///
/// The bytes are shared, so cloning a chunk (e.g. for a buffer snapshot)
/// does not copy the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    data: Arc<[u8]>,
}

impl Chunk {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Self { data: Arc::from(data) }
    }

    /// Size of the encoded payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// Decoded planar audio: one or more equal-length channels at a sample rate.
///
/// Only channel 0 is consumed by the recorder pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBuffer {
    channels: Vec<Arc<[f32]>>,
    sample_rate: u32,
}

impl DecodedBuffer {
    /// Single-channel buffer.
    pub fn mono(samples: impl Into<Vec<f32>>, sample_rate: u32) -> Self {
        let samples: Vec<f32> = samples.into();
        Self {
            channels: vec![Arc::from(samples)],
            sample_rate,
        }
    }

    /// Planar buffer. All channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, RecorderError> {
        let Some(first) = channels.first() else {
            return Err(RecorderError::Decode("decoded buffer has no channels".into()));
        };
        let frames = first.len();
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(RecorderError::Decode("decoded channels differ in length".into()));
        }
        Ok(Self {
            channels: channels.into_iter().map(Arc::<[f32]>::from).collect(),
            sample_rate,
        })
    }

    /// De-interleave `[c0, c1, .., c0, c1, ..]` frames into a planar buffer.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Result<Self, RecorderError> {
        if channel_count == 0 {
            return Err(RecorderError::Decode("channel count must be at least 1".into()));
        }
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }
        Self::from_channels(channels, sample_rate)
    }

    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(|ch| &ch[..])
    }

    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, |ch| ch.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Channel 0 as a sample sequence sharing the same storage.
    pub fn to_mono_sequence(&self) -> SampleSequence {
        let samples = self
            .channels
            .first()
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::<f32>::new()));
        SampleSequence {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}

/// Flat mono sequence of normalized f32 samples at a known rate.
///
/// Storage is shared and immutable; transforms allocate a new sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl SampleSequence {
    pub fn new(samples: impl Into<Vec<f32>>, sample_rate: u32) -> Self {
        let samples: Vec<f32> = samples.into();
        Self {
            samples: Arc::from(samples),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Whether two sequences share the same backing storage.
    pub fn shares_storage_with(&self, other: &SampleSequence) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_reports_byte_size() {
        let chunk = Chunk::new(vec![1u8, 2, 3]);
        assert_eq!(chunk.size(), 3);
        assert_eq!(chunk.as_bytes(), &[1, 2, 3]);
        assert!(Chunk::new(Vec::new()).is_empty());
    }

    #[test]
    fn deinterleave_stereo() {
        let buffer = DecodedBuffer::from_interleaved(&[0.1, 0.9, 0.2, 0.8, 0.3], 2, 44100).unwrap();
        assert_eq!(buffer.number_of_channels(), 2);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.channel_data(0).unwrap(), &[0.1, 0.2]);
        assert_eq!(buffer.channel_data(1).unwrap(), &[0.9, 0.8]);
    }

    #[test]
    fn from_channels_rejects_mismatched_lengths() {
        let result = DecodedBuffer::from_channels(vec![vec![0.0; 4], vec![0.0; 3]], 48000);
        assert!(matches!(result, Err(RecorderError::Decode(_))));
        assert!(DecodedBuffer::from_channels(Vec::new(), 48000).is_err());
    }

    #[test]
    fn duration_from_length_and_rate() {
        let buffer = DecodedBuffer::mono(vec![0.0; 24000], 48000);
        approx::assert_abs_diff_eq!(buffer.duration_secs(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn mono_sequence_shares_channel_zero() {
        let buffer = DecodedBuffer::mono(vec![0.5, -0.5], 8000);
        let a = buffer.to_mono_sequence();
        let b = buffer.to_mono_sequence();
        assert!(a.shares_storage_with(&b));
        assert_eq!(a.samples(), &[0.5, -0.5]);
        assert_eq!(a.sample_rate(), 8000);
    }
}
