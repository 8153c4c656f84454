//! Core data types for beatmark
//!
//! These types represent the domain model and flow through the pipeline.

use serde::{Deserialize, Serialize};

// =============================================================================
// Beat events
// =============================================================================

/// A single detected beat: a timestamp plus the 1-based position of the beat
/// within its bar, as reported by the upstream detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    /// Beat time in seconds from the start of the audio
    pub time: f64,
    /// 1-based index of the beat within its bar (not verified here)
    pub raw_position: u32,
}

impl BeatEvent {
    pub fn new(time: f64, raw_position: u32) -> Self {
        Self { time, raw_position }
    }
}

// =============================================================================
// Metrical pattern
// =============================================================================

/// The inferred bar length of a beat sequence.
///
/// Derived once per run from the set of distinct raw positions observed;
/// `Unknown` is the designed fallback for anything that is not a clean
/// 2-, 3-, or 4-beat bar, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    Duple,
    Triple,
    Quadruple,
    Unknown,
}

impl Pattern {
    /// Beats per bar, if the pattern is known
    pub fn beats_per_bar(self) -> Option<u32> {
        match self {
            Pattern::Duple => Some(2),
            Pattern::Triple => Some(3),
            Pattern::Quadruple => Some(4),
            Pattern::Unknown => None,
        }
    }
}

impl std::fmt::Display for Pattern {
    /// Human-readable beats-per-bar expression, used in plot titles and
    /// export metadata
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Pattern::Duple => "1-2",
            Pattern::Triple => "1-2-3",
            Pattern::Quadruple => "1-2-3-4",
            Pattern::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Salience
// =============================================================================

/// Three-level accent classification driving both visual and audible
/// rendering weight.
///
/// Ordering is part of the contract: `Primary` always renders heavier and
/// louder than `Secondary`, which renders heavier and louder than `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalienceTier {
    /// The bar's downbeat (raw position 1)
    Primary,
    /// The mid-bar accent position for the inferred pattern
    Secondary,
    /// Every remaining beat
    Other,
}

/// A beat event tagged with its salience tier.
///
/// Created once per input event, immutable, shared read-only by all three
/// output sinks. Every classified beat in a run was tagged against the same
/// `Pattern`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedBeat {
    pub event: BeatEvent,
    pub tier: SalienceTier,
}

impl ClassifiedBeat {
    /// Beat time in seconds
    pub fn time(&self) -> f64 {
        self.event.time
    }
}

// =============================================================================
// Audio buffer
// =============================================================================

/// Decoded audio samples ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Mono samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration: f64,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        // Guard against division by zero - use 0 duration for invalid sample rate
        let duration = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            samples,
            sample_rate,
            duration,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_display_matches_beats_per_bar() {
        assert_eq!(Pattern::Duple.to_string(), "1-2");
        assert_eq!(Pattern::Triple.to_string(), "1-2-3");
        assert_eq!(Pattern::Quadruple.to_string(), "1-2-3-4");
        assert_eq!(Pattern::Unknown.to_string(), "unknown");
        assert_eq!(Pattern::Quadruple.beats_per_bar(), Some(4));
        assert_eq!(Pattern::Unknown.beats_per_bar(), None);
    }

    #[test]
    fn audio_buffer_duration() {
        let buf = AudioBuffer::new(vec![0.0; 44100], 44100);
        assert!((buf.duration - 1.0).abs() < 1e-9);
        assert_eq!(buf.len(), 44100);
        assert!(!buf.is_empty());
    }

    #[test]
    fn audio_buffer_zero_sample_rate() {
        let buf = AudioBuffer::new(vec![0.0; 100], 0);
        assert_eq!(buf.duration, 0.0);
    }
}
