//! # wav-recorder-core
//!
//! Recorder core library.
//!
//! Buffers captured audio chunks and turns them into a mono RIFF/WAVE PCM
//! artifact: decoded buffers are merged, decimated to the output rate and
//! quantized to 8- or 16-bit PCM. Host capabilities (capture, decode, byte
//! reading, playback) plug in through the traits in [`traits`].
//!
//! ## Architecture
//!
//! ```text
//! wav-recorder-core (this crate)
//! ├── traits/       ← CaptureSource, AudioDecoder, ByteReader, OutputDevice, RecorderDelegate
//! ├── models/       ← RecorderError, RecorderState, RecorderConfiguration, Chunk, DecodedBuffer, etc.
//! ├── processing/   ← SampleBuffer, merger, resampler, WAV format/encoder
//! ├── session/      ← RecordingSession (orchestrator)
//! └── storage/      ← InMemoryByteReader, metadata JSON
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{Chunk, DecodedBuffer, SampleSequence};
pub use models::config::RecorderConfiguration;
pub use models::error::RecorderError;
pub use models::recording_result::{ArtifactMetadata, Base64Payload, EncodedArtifact};
pub use models::state::RecorderState;
pub use processing::sample_buffer::SampleBuffer;
pub use session::recording::{RecorderCollaborators, RecordingSession};
pub use storage::memory_reader::InMemoryByteReader;
pub use traits::byte_reader::ByteReader;
pub use traits::capture_source::{CaptureSource, ChunkCallback};
pub use traits::decoder::AudioDecoder;
pub use traits::output_device::OutputDevice;
pub use traits::recorder_delegate::RecorderDelegate;
