use async_trait::async_trait;

use crate::models::error::RecorderError;
use crate::models::recording_result::EncodedArtifact;

/// Converts an encoded artifact into a transportable form.
#[async_trait]
pub trait ByteReader: Send + Sync {
    /// Raw bytes of the artifact.
    async fn to_bytes(&self, artifact: &EncodedArtifact) -> Result<Vec<u8>, RecorderError>;

    /// Standard-alphabet base64 text of the artifact (no data URL prefix).
    async fn to_base64(&self, artifact: &EncodedArtifact) -> Result<String, RecorderError>;
}
