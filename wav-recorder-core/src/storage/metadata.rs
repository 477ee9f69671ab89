use crate::models::error::RecorderError;
use crate::models::recording_result::ArtifactMetadata;

/// Serialize artifact metadata as pretty-printed JSON (e.g. an upload manifest).
pub fn metadata_to_json(metadata: &ArtifactMetadata) -> Result<String, RecorderError> {
    serde_json::to_string_pretty(metadata)
        .map_err(|e| RecorderError::Serialization(format!("failed to serialize metadata: {}", e)))
}

/// Parse artifact metadata from JSON.
pub fn metadata_from_json(json: &str) -> Result<ArtifactMetadata, RecorderError> {
    serde_json::from_str(json).map_err(|e| RecorderError::Serialization(format!("failed to parse metadata: {}", e)))
}
