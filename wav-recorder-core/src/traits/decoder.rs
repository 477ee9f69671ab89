use async_trait::async_trait;

use crate::models::audio_models::{Chunk, DecodedBuffer};
use crate::models::error::RecorderError;

/// Turns an opaque encoded chunk into decoded sample data.
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    /// Decode one chunk. Malformed input fails with `RecorderError::Decode`.
    async fn decode(&self, chunk: &Chunk) -> Result<DecodedBuffer, RecorderError>;
}
