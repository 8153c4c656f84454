//! Audio IO: symphonia decode in, hound WAV out

pub mod decoder;
pub mod writer;

pub use decoder::{decode, OUTPUT_SAMPLE_RATE};
pub use writer::write_wav;
