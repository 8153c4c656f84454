//! Pipeline orchestration
//!
//! One synchronous pass: decode the audio, load the beat events, classify
//! once, then drive the three sinks off the same classified sequence. The
//! sinks are mutually independent but run sequentially; every error is
//! terminal and the run is stateless, so identical inputs always produce
//! identical artifacts.

use crate::analysis;
use crate::audio;
use crate::beats::{BeatFile, BeatSource};
use crate::config::Settings;
use crate::error::{BeatmarkError, Result};
use crate::export;
use crate::render::{clicktrack, waveform};
use crate::types::Pattern;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Summary of one completed run
#[derive(Debug)]
pub struct RunSummary {
    /// Number of beat events annotated
    pub beat_count: usize,
    /// Inferred metrical pattern
    pub pattern: Pattern,
    /// Annotated waveform image
    pub image: PathBuf,
    /// Click-track mix
    pub audio: PathBuf,
    /// JSON export
    pub export: PathBuf,
}

/// Run the full annotation pipeline
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let pipeline_start = Instant::now();

    // Both inputs must exist before any sink runs
    if !settings.audio.exists() {
        return Err(BeatmarkError::MissingInput(settings.audio.clone()));
    }
    if !settings.beats.exists() {
        return Err(BeatmarkError::MissingInput(settings.beats.clone()));
    }

    // Decode
    let decode_start = Instant::now();
    let base_audio = audio::decode(&settings.audio)?;
    info!(
        "Decoded {:.2}s of audio in {:.2}s",
        base_audio.duration,
        decode_start.elapsed().as_secs_f64()
    );

    // Load and classify
    let source = BeatFile::new(&settings.beats);
    let events = source.events()?;
    let (pattern, classified) = analysis::classify(&events);
    info!(
        "Classified {} beats (pattern: {})",
        classified.len(),
        pattern
    );

    // Waveform image
    let image_start = Instant::now();
    waveform::render(&base_audio, &classified, pattern, &settings.image_out)?;
    info!(
        "Waveform rendered in {:.2}s",
        image_start.elapsed().as_secs_f64()
    );

    // Click-track mix; the renderer owns the buffer while overlaying
    let mix_start = Instant::now();
    let mixed = clicktrack::render(base_audio, &classified);
    audio::write_wav(&mixed, &settings.audio_out)?;
    info!(
        "Click-track mixed in {:.2}s",
        mix_start.elapsed().as_secs_f64()
    );

    // JSON export
    export::write_json(&events, pattern, &settings.export_out)?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(RunSummary {
        beat_count: events.len(),
        pattern,
        image: settings.image_out.clone(),
        audio: settings.audio_out.clone(),
        export: settings.export_out.clone(),
    })
}
