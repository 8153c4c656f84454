//! Click-track rendering
//!
//! Overlays a short sine tick onto the base audio at every beat, one fixed
//! timbre per salience tier. The renderer owns the mixing buffer for the
//! duration of the call and mutates it beat by beat in ascending time
//! order; ticks never change the buffer's length.

use crate::types::{AudioBuffer, ClassifiedBeat, SalienceTier};
use tracing::debug;

/// One tier's tick timbre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickTone {
    /// Sine frequency in Hz
    pub frequency_hz: f64,
    /// Total tick length in milliseconds
    pub duration_ms: u32,
    /// Linear fade-out applied over the tail, in milliseconds
    pub fade_out_ms: u32,
    /// Peak gain relative to full scale, in dB (always negative here)
    pub gain_db: f64,
}

/// Downbeat tick: loudest, mid pitch
pub const PRIMARY_TONE: ClickTone = ClickTone {
    frequency_hz: 1000.0,
    duration_ms: 50,
    fade_out_ms: 25,
    gain_db: -3.0,
};

/// Mid-bar accent tick: softer, higher pitch
pub const SECONDARY_TONE: ClickTone = ClickTone {
    frequency_hz: 1200.0,
    duration_ms: 50,
    fade_out_ms: 25,
    gain_db: -6.0,
};

/// Remaining beats: quietest, lowest pitch
pub const OTHER_TONE: ClickTone = ClickTone {
    frequency_hz: 800.0,
    duration_ms: 50,
    fade_out_ms: 25,
    gain_db: -9.0,
};

/// The tick timbre for a salience tier
pub fn tone_for(tier: SalienceTier) -> ClickTone {
    match tier {
        SalienceTier::Primary => PRIMARY_TONE,
        SalienceTier::Secondary => SECONDARY_TONE,
        SalienceTier::Other => OTHER_TONE,
    }
}

impl ClickTone {
    /// Peak amplitude on a [0, 1] linear scale
    fn amplitude(&self) -> f32 {
        10f32.powf(self.gain_db as f32 / 20.0)
    }

    /// Synthesize the tick at the given sample rate
    fn synthesize(&self, sample_rate: u32) -> Vec<f32> {
        let total = (self.duration_ms as u64 * sample_rate as u64 / 1000) as usize;
        let fade = ((self.fade_out_ms as u64 * sample_rate as u64 / 1000) as usize).min(total);
        let amplitude = self.amplitude();
        let step = 2.0 * std::f64::consts::PI * self.frequency_hz / sample_rate as f64;

        (0..total)
            .map(|i| {
                let sample = (step * i as f64).sin() as f32 * amplitude;
                if i >= total - fade && fade > 0 {
                    // Linear ramp to zero over the fade tail
                    let remaining = (total - i) as f32 / fade as f32;
                    sample * remaining
                } else {
                    sample
                }
            })
            .collect()
    }
}

/// Mix a tick per classified beat into the base audio.
///
/// Takes ownership of the buffer and returns it with the ticks overlaid.
/// Overlays are additive, with each written sample clamped to [-1, 1], so
/// when two beats land on the same millisecond the later overlay decides
/// how any clipping resolves. A tick starting near the end of the audio is
/// truncated at the buffer boundary, never skipped, and the output length
/// always equals the input length. An empty beat sequence returns the base
/// unchanged.
pub fn render(mut base: AudioBuffer, beats: &[ClassifiedBeat]) -> AudioBuffer {
    if beats.is_empty() {
        return base;
    }

    // Overlay in ascending time order regardless of input order
    let mut ordered: Vec<&ClassifiedBeat> = beats.iter().collect();
    ordered.sort_by(|a, b| a.time().total_cmp(&b.time()));

    let sample_rate = base.sample_rate;
    let mut truncated = 0usize;
    for beat in ordered {
        let tone = tone_for(beat.tier);
        let position_ms = (beat.time() * 1000.0).round() as u64;
        let offset = (position_ms * sample_rate as u64 / 1000) as usize;
        if overlay(&mut base.samples, &tone.synthesize(sample_rate), offset) {
            truncated += 1;
        }
    }

    if truncated > 0 {
        debug!("{} ticks truncated at the end of the audio", truncated);
    }

    base
}

/// Add `tone` into `samples` starting at `offset`, clamping each result.
///
/// Returns true when the tone ran past the end of the buffer.
fn overlay(samples: &mut [f32], tone: &[f32], offset: usize) -> bool {
    if offset >= samples.len() {
        return true;
    }
    let available = samples.len() - offset;
    let writable = tone.len().min(available);
    for (target, &tick) in samples[offset..offset + writable].iter_mut().zip(tone) {
        *target = (*target + tick).clamp(-1.0, 1.0);
    }
    writable < tone.len()
}
