pub mod byte_reader;
pub mod capture_source;
pub mod decoder;
pub mod output_device;
pub mod recorder_delegate;
