//! Unified error types for beatmark
//!
//! Error strategy: every error is terminal for the run. The pipeline is a
//! single pass over one input file, so there is nothing to skip-and-continue;
//! a failure halts before (or instead of) writing the remaining sinks.
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for beatmark operations
#[derive(Debug, Error)]
pub enum BeatmarkError {
    #[error("Input file not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    MissingInput(PathBuf),

    #[error("Failed to decode '{path}': {reason}\n  Tip: The file must contain at least one audio track (audio files and audio-bearing video are both accepted)")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Malformed beat line in '{path}' (line {line}): {reason}\n  Expected one \"<seconds> <position>\" pair per line, e.g. \"1.523 3\"")]
    MalformedBeatLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Cannot write output '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    RenderSink { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for beatmark operations
pub type Result<T> = std::result::Result<T, BeatmarkError>;

impl BeatmarkError {
    /// Create a decode error with context about the issue
    pub fn decode_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BeatmarkError::DecodeError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a sink error from any displayable backend failure
    pub fn render_sink(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        BeatmarkError::RenderSink {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a sink error from an IO failure, mapping common kinds to
    /// readable reasons
    pub fn sink_io_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Permission denied. Check that you have write access to {}",
                    path.display()
                )
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        BeatmarkError::RenderSink { path, reason }
    }
}
