use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::processing::wav_format::WAV_HEADER_SIZE;

/// MIME type attached to every encoded artifact.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// A complete mono RIFF/WAVE PCM byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
    sample_rate: u32,
    bit_depth: u16,
}

impl EncodedArtifact {
    pub(crate) fn new(bytes: Vec<u8>, sample_rate: u32, bit_depth: u16) -> Self {
        Self {
            bytes,
            sample_rate,
            bit_depth,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total byte length, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn sample_count(&self) -> usize {
        let bytes_per_sample = (self.bit_depth / 8).max(1) as usize;
        self.bytes.len().saturating_sub(WAV_HEADER_SIZE) / bytes_per_sample
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / self.sample_rate as f64
    }

    /// SHA-256 hex digest of the full byte stream.
    pub fn checksum(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Describe this artifact for a host or upload manifest.
    pub fn metadata(&self) -> ArtifactMetadata {
        ArtifactMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            mime_type: WAV_MIME_TYPE.to_string(),
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
            channels: 1,
            sample_count: self.sample_count(),
            duration_secs: self.duration_secs(),
            byte_length: self.len(),
            checksum: self.checksum(),
        }
    }
}

/// Transportable form of an artifact handed to the `on_stop` hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64Payload {
    pub base64: String,
    /// Byte length of the WAV stream (not of the base64 text).
    pub length: usize,
}

impl Base64Payload {
    /// `data:audio/wav;base64,...` form of the payload.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", WAV_MIME_TYPE, self.base64)
    }
}

/// Serializable description of an encoded artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub id: String,
    pub created_at: String,
    pub mime_type: String,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub channels: u16,
    pub sample_count: usize,
    pub duration_secs: f64,
    pub byte_length: usize,
    pub checksum: String,
}
