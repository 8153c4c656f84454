//! Structured export of the beat sequence

pub mod json;

pub use json::{read_json, write_json};
