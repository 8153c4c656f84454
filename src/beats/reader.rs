//! Beat event text format
//!
//! One `"<time> <raw_position>"` pair per line, whitespace separated; the
//! format beat detectors dump and this tool reads back. Parsing is strict: a
//! line that does not parse aborts the run rather than being skipped, so a
//! truncated or mislabeled file never produces a silently partial
//! classification.

use crate::error::{BeatmarkError, Result};
use crate::types::BeatEvent;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Read beat events from a text file.
///
/// Errors with `MalformedBeatLine` (carrying the 1-based line number) on the
/// first line that is not a `<float> <int>` pair. Blank lines are malformed
/// too; the upstream dumpers never emit them.
pub fn read_beat_file(path: &Path) -> Result<Vec<BeatEvent>> {
    if !path.exists() {
        return Err(BeatmarkError::MissingInput(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        events.push(parse_line(&line).map_err(|reason| BeatmarkError::MalformedBeatLine {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?);
    }

    debug!("Read {} beat events from {}", events.len(), path.display());
    Ok(events)
}

/// Write beat events in the text format `read_beat_file` accepts.
///
/// Round-trips: reading the written file yields numerically identical
/// events. Useful for caching an external detector's output next to the
/// audio it describes.
pub fn write_beat_file(events: &[BeatEvent], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| BeatmarkError::sink_io_error(path, e))?;
    let mut writer = BufWriter::new(file);

    for event in events {
        writeln!(writer, "{} {}", event.time, event.raw_position)
            .map_err(|e| BeatmarkError::sink_io_error(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| BeatmarkError::sink_io_error(path, e))?;

    debug!("Wrote {} beat events to {}", events.len(), path.display());
    Ok(())
}

fn parse_line(line: &str) -> std::result::Result<BeatEvent, String> {
    let mut parts = line.split_whitespace();
    let time_str = parts.next().ok_or_else(|| "empty line".to_string())?;
    let pos_str = parts
        .next()
        .ok_or_else(|| format!("missing beat position after '{}'", time_str))?;
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected trailing field '{}'", extra));
    }

    let time: f64 = time_str
        .parse()
        .map_err(|_| format!("'{}' is not a valid time in seconds", time_str))?;
    let raw_position: u32 = pos_str
        .parse()
        .map_err(|_| format!("'{}' is not a valid beat position", pos_str))?;

    if time < 0.0 || !time.is_finite() {
        return Err(format!("time {} is not a finite non-negative value", time));
    }
    if raw_position == 0 {
        return Err("beat positions are 1-based, got 0".to_string());
    }

    Ok(BeatEvent::new(time, raw_position))
}
