use serde::{Deserialize, Serialize};

use super::error::RecorderError;

/// Bit depths the WAV encoder can produce.
pub const SUPPORTED_BIT_DEPTHS: [u16; 2] = [8, 16];

/// Configuration for a recording session.
///
/// Set once at construction. The encoder always uses the smaller of the
/// input/output rate and bit depth (see [`effective_sample_rate`] and
/// [`effective_sample_bits`]), while decimation uses the configured rates as-is.
///
/// [`effective_sample_rate`]: RecorderConfiguration::effective_sample_rate
/// [`effective_sample_bits`]: RecorderConfiguration::effective_sample_bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecorderConfiguration {
    /// Keep previously captured chunks when a new recording starts (default: false).
    pub keep_across_starts: bool,

    /// Request capture permission when the session is connected (default: false).
    pub auto_authorize: bool,

    /// Sample rate of the captured audio in Hz (default: 48000).
    pub input_sample_rate: u32,

    /// Bit depth of the captured audio (default: 16). Valid values: 8, 16.
    pub input_sample_bits: u16,

    /// Target sample rate in Hz (default: 16000).
    pub output_sample_rate: u32,

    /// Target bit depth (default: 16). Valid values: 8, 16.
    pub output_sample_bits: u16,
}

impl RecorderConfiguration {
    pub fn validate(&self) -> Result<(), RecorderError> {
        if self.input_sample_rate == 0 || self.output_sample_rate == 0 {
            return Err(RecorderError::ConfigurationFailed(
                "sample rates must be positive".into(),
            ));
        }
        for bits in [self.input_sample_bits, self.output_sample_bits] {
            if !SUPPORTED_BIT_DEPTHS.contains(&bits) {
                return Err(RecorderError::ConfigurationFailed(format!(
                    "unsupported bit depth: {}",
                    bits
                )));
            }
        }
        Ok(())
    }

    /// Sample rate written into the WAV header.
    pub fn effective_sample_rate(&self) -> u32 {
        self.input_sample_rate.min(self.output_sample_rate)
    }

    /// Bit depth used for quantization.
    pub fn effective_sample_bits(&self) -> u16 {
        self.input_sample_bits.min(self.output_sample_bits)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RecorderError::ConfigurationFailed(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for RecorderConfiguration {
    fn default() -> Self {
        Self {
            keep_across_starts: false,
            auto_authorize: false,
            input_sample_rate: 48000,
            input_sample_bits: 16,
            output_sample_rate: 16000,
            output_sample_bits: 16,
        }
    }
}
