use thiserror::Error;

/// Errors that can occur while recording, merging or encoding audio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no audio data to process")]
    EmptyInput,

    #[error("cannot resample {input_rate} Hz to {output_rate} Hz: upsampling is not supported")]
    UnsupportedUpsample { input_rate: u32, output_rate: u32 },

    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("permission denied")]
    PermissionDenied,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
