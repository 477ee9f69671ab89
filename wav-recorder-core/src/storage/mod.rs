pub mod memory_reader;
pub mod metadata;
