//! beatmark - Beat annotation and click-track rendering
//!
//! A command-line utility that turns a sequence of detected beat events
//! (timestamp + position-in-bar) into three synchronized artifacts: an
//! annotated waveform image, a click-track mix of the source audio, and a
//! JSON export of the beat data.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `audio`: Audio decoding using symphonia, WAV output using hound
//! - `beats`: Beat event sources (text files or in-memory detector output)
//! - `analysis`: Metrical pattern inference and salience classification
//! - `render`: Waveform annotation and click-track mixing
//! - `export`: JSON output
//! - `pipeline`: Sequential orchestration of one run
//!
//! # Example
//!
//! ```no_run
//! use beatmark::{config::Settings, pipeline};
//!
//! let settings = Settings::for_input("track.mp3".as_ref(), None);
//! let summary = pipeline::run(&settings).expect("Analysis failed");
//! println!("Annotated {} beats", summary.beat_count);
//! ```

pub mod analysis;
pub mod audio;
pub mod beats;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod types;

// Re-export key types at crate root
pub use error::{BeatmarkError, Result};
pub use types::{AudioBuffer, BeatEvent, ClassifiedBeat, Pattern, SalienceTier};
