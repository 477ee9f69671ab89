//! Integer-ratio decimation of a mono sample sequence.
//!
//! Keeps every `ratio`-th sample and drops the rest. No anti-aliasing filter
//! is applied.

use crate::models::audio_models::SampleSequence;
use crate::models::error::RecorderError;

/// Decimation stride for `input_rate → output_rate`.
pub fn decimation_ratio(input_rate: u32, output_rate: u32) -> Result<usize, RecorderError> {
    let ratio = input_rate.checked_div(output_rate).unwrap_or(0);
    if ratio == 0 {
        return Err(RecorderError::UnsupportedUpsample {
            input_rate,
            output_rate,
        });
    }
    Ok(ratio as usize)
}

/// Decimate `samples` from `input_rate` down to `output_rate`.
///
/// Output length is `floor(len / ratio)` and `out[i] = in[i * ratio]`, where
/// `ratio = floor(input_rate / output_rate)`. The result is tagged with
/// `input_rate / ratio`.
pub fn compress(samples: &SampleSequence, input_rate: u32, output_rate: u32) -> Result<SampleSequence, RecorderError> {
    let ratio = decimation_ratio(input_rate, output_rate)?;
    let length = samples.len() / ratio;

    let output: Vec<f32> = samples.samples().iter().step_by(ratio).take(length).copied().collect();

    log::debug!(
        "Decimated {} samples by {} ({} Hz -> {} Hz): {} samples",
        samples.len(),
        ratio,
        input_rate,
        output_rate,
        output.len()
    );

    Ok(SampleSequence::new(output, input_rate / ratio as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_eight_to_sixteen_keeps_every_third() {
        let input: Vec<f32> = (0..300).map(|i| i as f32).collect();
        let seq = SampleSequence::new(input.clone(), 48000);

        let output = compress(&seq, 48000, 16000).unwrap();

        assert_eq!(output.len(), 100);
        assert_eq!(output.sample_rate(), 16000);
        for (i, &sample) in output.samples().iter().enumerate() {
            assert_eq!(sample, input[i * 3]);
        }
    }

    #[test]
    fn length_is_floored() {
        let seq = SampleSequence::new(vec![0.0; 301], 48000);
        assert_eq!(compress(&seq, 48000, 16000).unwrap().len(), 100);

        let seq = SampleSequence::new(vec![0.0; 2], 48000);
        assert!(compress(&seq, 48000, 16000).unwrap().is_empty());
    }

    #[test]
    fn non_integer_ratio_is_floored() {
        // 44100 / 16000 = 2.75 -> stride 2
        assert_eq!(decimation_ratio(44100, 16000).unwrap(), 2);
        let seq = SampleSequence::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 44100);
        let output = compress(&seq, 44100, 16000).unwrap();
        assert_eq!(output.samples(), &[1.0, 3.0]);
        assert_eq!(output.sample_rate(), 22050);
    }

    #[test]
    fn equal_rates_pass_through() {
        let seq = SampleSequence::new(vec![0.1, 0.2, 0.3], 16000);
        let output = compress(&seq, 16000, 16000).unwrap();
        assert_eq!(output.samples(), seq.samples());
        assert!(!output.shares_storage_with(&seq));
    }

    #[test]
    fn upsampling_is_rejected() {
        let seq = SampleSequence::new(vec![0.0; 10], 16000);
        assert_eq!(
            compress(&seq, 16000, 48000),
            Err(RecorderError::UnsupportedUpsample {
                input_rate: 16000,
                output_rate: 48000
            })
        );
    }

    #[test]
    fn zero_output_rate_is_rejected() {
        assert!(matches!(
            decimation_ratio(48000, 0),
            Err(RecorderError::UnsupportedUpsample { .. })
        ));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let seq = SampleSequence::new(Vec::new(), 48000);
        assert!(compress(&seq, 48000, 8000).unwrap().is_empty());
    }
}
