//! Beat event sources
//!
//! Beat detection itself is an external collaborator: this crate consumes
//! detector output, either from a pre-computed text file or handed over
//! in memory. The `BeatSource` trait is the seam an embedded detector would
//! plug into without changing pipeline code.

pub mod reader;

pub use reader::{read_beat_file, write_beat_file};

use crate::error::Result;
use crate::types::BeatEvent;
use std::path::PathBuf;

/// A provider of ordered beat events
pub trait BeatSource {
    /// Produce the beat event sequence for one run
    fn events(&self) -> Result<Vec<BeatEvent>>;

    /// Get the name of this source (for logging)
    fn name(&self) -> &'static str;
}

/// Beat events from a pre-computed text file
pub struct BeatFile {
    path: PathBuf,
}

impl BeatFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BeatSource for BeatFile {
    fn events(&self) -> Result<Vec<BeatEvent>> {
        reader::read_beat_file(&self.path)
    }

    fn name(&self) -> &'static str {
        "beat-file"
    }
}

/// Beat events already held in memory, e.g. straight from a detector
pub struct InMemorySource {
    events: Vec<BeatEvent>,
}

impl InMemorySource {
    pub fn new(events: Vec<BeatEvent>) -> Self {
        Self { events }
    }

    /// Build from bare `(time, raw_position)` pairs
    pub fn from_pairs(pairs: &[(f64, u32)]) -> Self {
        Self {
            events: pairs.iter().map(|&(t, p)| BeatEvent::new(t, p)).collect(),
        }
    }
}

impl BeatSource for InMemorySource {
    fn events(&self) -> Result<Vec<BeatEvent>> {
        Ok(self.events.clone())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn beat_file_source_reads_its_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.beats");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"0.5 1\n1.0 2\n").unwrap();

        let source = BeatFile::new(&path);
        assert_eq!(source.events().unwrap().len(), 2);
        assert_eq!(source.name(), "beat-file");
    }

    #[test]
    fn in_memory_source_from_pairs() {
        let source = InMemorySource::from_pairs(&[(0.5, 1), (1.0, 2)]);
        let events = source.events().unwrap();
        assert_eq!(events, vec![BeatEvent::new(0.5, 1), BeatEvent::new(1.0, 2)]);
        assert_eq!(source.name(), "in-memory");
    }
}
