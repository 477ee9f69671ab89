//! WAV file format utilities.
//!
//! Generates standard 44-byte RIFF WAV headers, quantizes normalized f32
//! samples to 8/16-bit PCM and serializes complete mono WAV byte streams.

use crate::models::config::SUPPORTED_BIT_DEPTHS;
use crate::models::error::RecorderError;
use crate::models::recording_result::EncodedArtifact;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Mono output: one sample per frame.
const OUTPUT_CHANNELS: u16 = 1;

/// Largest PCM payload whose RIFF chunk size (`36 + data_size`) still fits in `u32`.
pub const MAX_DATA_SIZE: u32 = u32::MAX - 36;

/// Build the 44-byte header of a mono PCM WAV stream.
///
/// Offsets (all little-endian): `RIFF` at 0, `36 + data_size` at 4, `WAVE` at 8,
/// `fmt ` at 12, fmt size 16 at 16, format 1 at 20, 1 channel at 22, rate at 24,
/// `rate * bit_depth / 8` at 28, `bit_depth / 8` at 32, bit depth at 34, `data`
/// at 36, `data_size` at 40.
///
/// Fails with `ConfigurationFailed` when a derived field does not fit its slot.
pub fn generate_wav_header(sample_rate: u32, bit_depth: u16, data_size: u32) -> Result<[u8; WAV_HEADER_SIZE], RecorderError> {
    let bytes_per_sample = bit_depth / 8;
    let block_align = OUTPUT_CHANNELS * bytes_per_sample;
    let byte_rate = u32::try_from(u64::from(sample_rate) * u64::from(block_align)).map_err(|_| {
        RecorderError::ConfigurationFailed(format!(
            "byte rate of {} Hz at {} bits does not fit a WAV header",
            sample_rate, bit_depth
        ))
    })?;
    let chunk_size = data_size.checked_add(36).ok_or_else(|| {
        RecorderError::ConfigurationFailed(format!("{} bytes of PCM data exceed the WAV size limit", data_size))
    })?;

    let mut header = [0u8; WAV_HEADER_SIZE];
    let fields: [(usize, &[u8]); 13] = [
        (0, b"RIFF"),
        (4, &chunk_size.to_le_bytes()),
        (8, b"WAVE"),
        (12, b"fmt "),
        (16, &16u32.to_le_bytes()),
        (20, &1u16.to_le_bytes()), // PCM
        (22, &OUTPUT_CHANNELS.to_le_bytes()),
        (24, &sample_rate.to_le_bytes()),
        (28, &byte_rate.to_le_bytes()),
        (32, &block_align.to_le_bytes()),
        (34, &bit_depth.to_le_bytes()),
        (36, b"data"),
        (40, &data_size.to_le_bytes()),
    ];
    for (offset, field) in fields {
        header[offset..offset + field.len()].copy_from_slice(field);
    }
    Ok(header)
}

/// Header fields read back from a WAV byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bit_depth: u16,
    pub data_size: u32,
}

/// Parse the canonical 44-byte header produced by [`generate_wav_header`].
pub fn parse_wav_header(bytes: &[u8]) -> Result<WavHeader, RecorderError> {
    if bytes.len() < WAV_HEADER_SIZE {
        return Err(RecorderError::Decode(format!(
            "WAV stream too short: {} bytes",
            bytes.len()
        )));
    }
    let markers: [(usize, &[u8; 4]); 4] = [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")];
    for (offset, marker) in markers {
        if &bytes[offset..offset + 4] != marker {
            return Err(RecorderError::Decode(format!(
                "missing {:?} marker at offset {}",
                String::from_utf8_lossy(marker),
                offset
            )));
        }
    }

    let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
    let u32_at = |offset: usize| {
        u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    };

    Ok(WavHeader {
        chunk_size: u32_at(4),
        audio_format: u16_at(20),
        channels: u16_at(22),
        sample_rate: u32_at(24),
        byte_rate: u32_at(28),
        block_align: u16_at(32),
        bit_depth: u16_at(34),
        data_size: u32_at(40),
    })
}

/// Scale a sample to the signed 16-bit range.
///
/// Negative values scale by 32768 and positive values by 32767, so both
/// -1.0 and 1.0 hit the extremes of `i16`.
fn scale_to_i16(sample: f32) -> f32 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        s * 32768.0
    } else {
        s * 32767.0
    }
}

/// Quantize one sample to 16-bit PCM (truncating toward zero).
pub fn quantize_i16(sample: f32) -> i16 {
    scale_to_i16(sample) as i16
}

/// Quantize one sample to the 8-bit byte the encoder writes.
///
/// The 16-bit value is remapped linearly onto 0..=255. The result lands in the
/// file as that raw byte even though the slot is nominally signed, so silence
/// is written as 0x80 and full-scale negative as 0x00.
pub fn quantize_u8(sample: f32) -> u8 {
    let val = scale_to_i16(sample) as f64;
    (255.0 * (val + 32768.0) / 65535.0).round() as u8
}

/// Serialize mono samples into a complete RIFF/WAVE PCM byte stream.
pub fn encode(samples: &[f32], sample_rate: u32, sample_bits: u16) -> Result<EncodedArtifact, RecorderError> {
    if !SUPPORTED_BIT_DEPTHS.contains(&sample_bits) {
        return Err(RecorderError::UnsupportedBitDepth(sample_bits));
    }

    let bytes_per_sample = (sample_bits / 8) as usize;
    let data_length = samples.len() * bytes_per_sample;
    let data_size = u32::try_from(data_length)
        .ok()
        .filter(|&size| size <= MAX_DATA_SIZE)
        .ok_or_else(|| {
            RecorderError::ConfigurationFailed(format!("{} bytes of PCM data exceed the WAV size limit", data_length))
        })?;
    let header = generate_wav_header(sample_rate, sample_bits, data_size)?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + data_length);
    bytes.extend_from_slice(&header);

    if sample_bits == 8 {
        bytes.extend(samples.iter().map(|&s| quantize_u8(s)));
    } else {
        for &s in samples {
            bytes.extend_from_slice(&quantize_i16(s).to_le_bytes());
        }
    }

    log::debug!(
        "Encoded {} samples as {}-bit WAV at {} Hz ({} bytes)",
        samples.len(),
        sample_bits,
        sample_rate,
        bytes.len()
    );

    Ok(EncodedArtifact::new(bytes, sample_rate, sample_bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_markers_at_fixed_offsets() {
        let header = generate_wav_header(8000, 8, 0).unwrap();
        let markers: [(usize, &[u8]); 4] = [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")];
        for (offset, marker) in markers {
            assert_eq!(&header[offset..offset + 4], marker);
        }
        assert_eq!(parse_wav_header(&header).unwrap().channels, 1);
    }

    #[test]
    fn byte_rate_does_not_overflow_for_large_rates() {
        // rate * 16 would overflow u32, rate * 2 does not.
        let artifact = encode(&[0.0; 4], 300_000_000, 16).unwrap();
        let header = parse_wav_header(artifact.as_bytes()).unwrap();
        assert_eq!(header.sample_rate, 300_000_000);
        assert_eq!(header.byte_rate, 600_000_000);
    }

    #[test]
    fn unrepresentable_header_fields_are_errors() {
        assert!(matches!(
            generate_wav_header(u32::MAX, 16, 0),
            Err(RecorderError::ConfigurationFailed(_))
        ));
        assert!(matches!(
            generate_wav_header(16000, 16, MAX_DATA_SIZE + 1),
            Err(RecorderError::ConfigurationFailed(_))
        ));
        let header = generate_wav_header(16000, 16, MAX_DATA_SIZE).unwrap();
        assert_eq!(parse_wav_header(&header).unwrap().chunk_size, u32::MAX);
    }

    #[test]
    fn header_16khz_mono_16bit_fields() {
        let samples = vec![0.0f32; 100];
        let artifact = encode(&samples, 16000, 16).unwrap();
        let bytes = artifact.as_bytes();

        assert_eq!(bytes.len(), 44 + 200);

        // RIFF chunk size = 36 + data_size
        let chunk_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(chunk_size, 236);

        // fmt chunk size = 16, format code = 1 (PCM), one channel
        assert_eq!(u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 16);
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);

        let sample_rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
        assert_eq!(sample_rate, 16000);

        let byte_rate = u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]);
        assert_eq!(byte_rate, 32000);

        let block_align = u16::from_le_bytes([bytes[32], bytes[33]]);
        assert_eq!(block_align, 2);

        let bit_depth = u16::from_le_bytes([bytes[34], bytes[35]]);
        assert_eq!(bit_depth, 16);

        let data_size = u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]);
        assert_eq!(data_size, 200);
    }

    #[test]
    fn header_8bit_fields() {
        let artifact = encode(&[0.0; 10], 8000, 8).unwrap();
        let header = parse_wav_header(artifact.as_bytes()).unwrap();
        assert_eq!(artifact.len(), 54);
        assert_eq!(header.byte_rate, 8000);
        assert_eq!(header.block_align, 1);
        assert_eq!(header.bit_depth, 8);
        assert_eq!(header.data_size, 10);
        assert_eq!(header.chunk_size, 46);
    }

    #[test]
    fn parse_rejects_bad_streams() {
        assert!(parse_wav_header(&[0u8; 10]).is_err());

        let mut header = generate_wav_header(16000, 16, 0).unwrap();
        header[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(parse_wav_header(&header), Err(RecorderError::Decode(_))));
    }

    #[test]
    fn empty_samples_produce_bare_header() {
        let artifact = encode(&[], 16000, 16).unwrap();
        assert_eq!(artifact.len(), 44);
        assert_eq!(parse_wav_header(artifact.as_bytes()).unwrap().data_size, 0);
    }

    #[test]
    fn twelve_bit_is_rejected() {
        assert_eq!(encode(&[0.0], 16000, 12), Err(RecorderError::UnsupportedBitDepth(12)));
    }

    #[test]
    fn quantize_16bit_extremes() {
        assert_eq!(quantize_i16(0.0), 0);
        assert_eq!(quantize_i16(1.0), i16::MAX);
        assert_eq!(quantize_i16(-1.0), i16::MIN);
        assert_eq!(quantize_i16(0.5), 16383);
        assert_eq!(quantize_i16(-0.5), -16384);
    }

    #[test]
    fn quantize_clamps_out_of_range() {
        assert_eq!(quantize_i16(2.0), i16::MAX);
        assert_eq!(quantize_i16(-3.0), i16::MIN);
        assert_eq!(quantize_u8(2.0), 255);
        assert_eq!(quantize_u8(-3.0), 0);
    }

    #[test]
    fn quantize_8bit_remap() {
        assert_eq!(quantize_u8(-1.0), 0);
        assert_eq!(quantize_u8(1.0), 255);
        // 255 * 32768 / 65535 = 127.50.. rounds up
        assert_eq!(quantize_u8(0.0), 128);
    }

    #[test]
    fn payload_is_little_endian() {
        let artifact = encode(&[1.0, -1.0], 16000, 16).unwrap();
        let data = &artifact.as_bytes()[44..];
        assert_eq!(data, &[0xFF, 0x7F, 0x00, 0x80]);
    }

    #[test]
    fn round_trip_16bit_through_hound() {
        let samples: Vec<f32> = (0..400).map(|i| ((i as f32) * 0.05).sin() * 0.8).collect();
        let artifact = encode(&samples, 16000, 16).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(artifact.as_bytes())).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded.len(), samples.len());
        for (original, pcm) in samples.iter().zip(decoded) {
            let restored = if pcm < 0 { pcm as f32 / 32768.0 } else { pcm as f32 / 32767.0 };
            approx::assert_abs_diff_eq!(*original, restored, epsilon = 1.0 / 32768.0 + f32::EPSILON);
        }
    }

    #[test]
    fn round_trip_8bit_within_one_step() {
        let samples: Vec<f32> = (0..200).map(|i| (i as f32 / 100.0) - 1.0).collect();
        let artifact = encode(&samples, 8000, 8).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(artifact.as_bytes())).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 8);

        // hound recenters unsigned 8-bit PCM to i8; undo that and the 0..=255 remap.
        let decoded: Vec<i8> = reader.samples::<i8>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded.len(), samples.len());
        let step = 2.0 / 255.0;
        for (original, v) in samples.iter().zip(decoded) {
            let restored = (v as i16 + 128) as f32 / 255.0 * 2.0 - 1.0;
            approx::assert_abs_diff_eq!(*original, restored, epsilon = step);
        }
    }
}
