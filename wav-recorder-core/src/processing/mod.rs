pub mod merger;
pub mod resampler;
pub mod sample_buffer;
pub mod wav_format;
