use async_trait::async_trait;
use base64::Engine;

use crate::models::error::RecorderError;
use crate::models::recording_result::EncodedArtifact;
use crate::traits::byte_reader::ByteReader;

/// [`ByteReader`] for artifacts that already live in memory.
///
/// Completes immediately; hosts with their own blob storage provide their
/// own reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryByteReader;

#[async_trait]
impl ByteReader for InMemoryByteReader {
    async fn to_bytes(&self, artifact: &EncodedArtifact) -> Result<Vec<u8>, RecorderError> {
        Ok(artifact.as_bytes().to_vec())
    }

    async fn to_base64(&self, artifact: &EncodedArtifact) -> Result<String, RecorderError> {
        Ok(base64::engine::general_purpose::STANDARD.encode(artifact.as_bytes()))
    }
}
