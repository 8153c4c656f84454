//! JSON export for interoperability with other tools
//!
//! The payload is the ordered `(time, raw_position)` sequence as plain
//! nested arrays. Tiers are deliberately absent: salience is a
//! presentation-layer derivation any consumer can recompute from the raw
//! positions, so exporting it would only invite drift.

use crate::error::{BeatmarkError, Result};
use crate::types::{BeatEvent, Pattern};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level JSON output structure
#[derive(Debug, Serialize, Deserialize)]
pub struct BeatsJson {
    /// Schema version for forward compatibility
    pub version: String,
    /// Export metadata
    pub metadata: ExportMetadata,
    /// Ordered (time, raw_position) pairs
    pub beats: Vec<(f64, u32)>,
}

/// Export metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// beatmark version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
    /// Number of beats
    pub beat_count: usize,
    /// Inferred metrical pattern, human readable
    pub pattern: String,
}

/// Write the beat sequence to a JSON file.
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// This prevents a half-written document if the write is interrupted.
pub fn write_json(events: &[BeatEvent], pattern: Pattern, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| BeatmarkError::RenderSink {
        path: output_path.to_path_buf(),
        reason: format!("Failed to create temp file: {}", e),
    })?;
    let writer = BufWriter::new(file);

    let output = BeatsJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ExportMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            beat_count: events.len(),
            pattern: pattern.to_string(),
        },
        beats: events.iter().map(|e| (e.time, e.raw_position)).collect(),
    };

    serde_json::to_writer_pretty(writer, &output).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        BeatmarkError::render_sink(output_path, e)
    })?;

    // Atomic rename: either succeeds completely or leaves the target untouched
    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        BeatmarkError::RenderSink {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!("Wrote {} beats to {}", events.len(), output_path.display());
    Ok(())
}

/// Reload the beat sequence from an exported document.
///
/// Feeding the result back through the classifiers reproduces the original
/// run's pattern and tiers.
pub fn read_json(path: &Path) -> Result<Vec<BeatEvent>> {
    if !path.exists() {
        return Err(BeatmarkError::MissingInput(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let json: BeatsJson = serde_json::from_reader(reader)
        .map_err(|e| BeatmarkError::render_sink(path, format!("Failed to parse: {}", e)))?;

    Ok(json
        .beats
        .into_iter()
        .map(|(time, raw_position)| BeatEvent::new(time, raw_position))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use tempfile::TempDir;

    #[test]
    fn beats_serialize_as_plain_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let events = vec![BeatEvent::new(0.5, 1), BeatEvent::new(1.0, 2)];

        write_json(&events, Pattern::Duple, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["metadata"]["beat_count"], 2);
        assert_eq!(value["metadata"]["pattern"], "1-2");
        assert_eq!(value["beats"][0][0], 0.5);
        assert_eq!(value["beats"][0][1], 1);
        assert_eq!(value["beats"][1][0], 1.0);
        assert_eq!(value["beats"][1][1], 2);
        // Tier must not be exported
        assert!(value["beats"][0].as_array().unwrap().len() == 2);
    }

    #[test]
    fn round_trip_reproduces_classification() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let events = vec![
            BeatEvent::new(0.0, 1),
            BeatEvent::new(0.4, 2),
            BeatEvent::new(0.8, 3),
            BeatEvent::new(1.2, 1),
        ];
        let (pattern, original) = analysis::classify(&events);

        write_json(&events, pattern, &path).unwrap();
        let reloaded = read_json(&path).unwrap();
        let (pattern2, reclassified) = analysis::classify(&reloaded);

        assert_eq!(pattern, pattern2);
        assert_eq!(original, reclassified);
    }

    #[test]
    fn empty_sequence_exports_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        write_json(&[], Pattern::Unknown, &path).unwrap();
        assert!(read_json(&path).unwrap().is_empty());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_json(&[BeatEvent::new(0.5, 1)], Pattern::Unknown, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn unwritable_path_is_render_sink_error() {
        let err = write_json(&[], Pattern::Unknown, Path::new("/nonexistent-dir/out.json"));
        assert!(matches!(err, Err(BeatmarkError::RenderSink { .. })));
    }
}
