//! Folds decoded buffers into one mono sample sequence.
//!
//! Only channel 0 of each buffer is used. The merged sequence takes the
//! sample rate of the first buffer; buffers captured at other rates are
//! concatenated as-is.

use crate::models::audio_models::{DecodedBuffer, SampleSequence};
use crate::models::error::RecorderError;

/// Merge buffers in order into a single mono sequence.
///
/// A single buffer is returned as its channel 0 without copying. Longer
/// inputs are folded pairwise from the left.
pub fn merge(buffers: &[DecodedBuffer]) -> Result<SampleSequence, RecorderError> {
    let (first, rest) = buffers.split_first().ok_or(RecorderError::EmptyInput)?;
    let merged = rest
        .iter()
        .fold(first.to_mono_sequence(), |acc, next| merge_pair(&acc, &next.to_mono_sequence()));

    if buffers.len() > 1 {
        log::debug!(
            "Merged {} buffers into {} samples at {} Hz",
            buffers.len(),
            merged.len(),
            merged.sample_rate()
        );
    }
    Ok(merged)
}

/// Concatenate `second` after `first`, keeping the rate of `first`.
pub fn merge_pair(first: &SampleSequence, second: &SampleSequence) -> SampleSequence {
    if first.sample_rate() != second.sample_rate() {
        log::warn!(
            "Merging buffers with different sample rates ({} Hz and {} Hz); using {} Hz",
            first.sample_rate(),
            second.sample_rate(),
            first.sample_rate()
        );
    }

    let mut samples = Vec::with_capacity(first.len() + second.len());
    samples.extend_from_slice(first.samples());
    samples.extend_from_slice(second.samples());
    SampleSequence::new(samples, first.sample_rate())
}
