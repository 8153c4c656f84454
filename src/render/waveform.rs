//! Annotated waveform rendering
//!
//! Draws the mono waveform as a min/max envelope with one vertical marker
//! per beat, weighted by salience tier: the downbeat gets the heaviest
//! stroke and opacity, the mid-bar accent a medium one, everything else the
//! lightest. The inferred pattern is embedded in the title.

use crate::error::{BeatmarkError, Result};
use crate::types::{AudioBuffer, ClassifiedBeat, Pattern, SalienceTier};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Output raster dimensions in pixels
const IMAGE_WIDTH: u32 = 2000;
const IMAGE_HEIGHT: u32 = 600;

/// Waveform envelope stroke
const WAVEFORM_COLOR: RGBColor = RGBColor(70, 130, 180);

/// Per-tier marker style: (color, opacity, stroke width). Visual weight is
/// strictly monotone in tier.
fn marker_style(tier: SalienceTier) -> ShapeStyle {
    match tier {
        SalienceTier::Primary => RED.mix(0.8).stroke_width(2),
        SalienceTier::Secondary => GREEN.mix(0.6).stroke_width(2),
        SalienceTier::Other => BLUE.mix(0.4).stroke_width(1),
    }
}

/// Render the annotated waveform as a PNG file.
///
/// The x axis is seconds over the full audio duration, the y axis
/// dimensionless amplitude. A rendering or write failure surfaces as a
/// `RenderSink` error; there is no retry.
pub fn render(
    audio: &AudioBuffer,
    beats: &[ClassifiedBeat],
    pattern: Pattern,
    out_path: &Path,
) -> Result<()> {
    let sink = |e: &dyn std::fmt::Display| BeatmarkError::render_sink(out_path, e);

    let root = BitMapBackend::new(out_path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| sink(&e))?;

    // A degenerate x range makes plotters unhappy; an empty buffer still
    // gets a 1-second empty plot
    let x_max = if audio.duration > 0.0 { audio.duration } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Waveform with beats (pattern: {})", pattern),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_max, -1f64..1f64)
        .map_err(|e| sink(&e))?;

    chart
        .configure_mesh()
        .x_desc("Time (seconds)")
        .y_desc("Amplitude")
        .draw()
        .map_err(|e| sink(&e))?;

    if !audio.is_empty() {
        chart
            .draw_series(envelope(audio))
            .map_err(|e| sink(&e))?;
    }

    for beat in beats {
        let t = beat.time();
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(t, -1.0), (t, 1.0)],
                marker_style(beat.tier),
            )))
            .map_err(|e| sink(&e))?;
    }

    root.present().map_err(|e| sink(&e))?;

    info!(
        "Wrote waveform with {} beat markers to {}",
        beats.len(),
        out_path.display()
    );
    Ok(())
}

/// One vertical min/max segment per pixel column of the plot area
fn envelope(audio: &AudioBuffer) -> impl Iterator<Item = PathElement<(f64, f64)>> + '_ {
    let bin = (audio.len() / IMAGE_WIDTH as usize).max(1);
    let seconds_per_bin = bin as f64 / audio.sample_rate as f64;
    let style = WAVEFORM_COLOR.mix(0.5).stroke_width(1);

    audio.samples.chunks(bin).enumerate().map(move |(i, chunk)| {
        let (lo, hi) = chunk.iter().fold((0f32, 0f32), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
        let t = i as f64 * seconds_per_bin;
        PathElement::new(vec![(t, lo as f64), (t, hi as f64)], style)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeatEvent;
    use tempfile::TempDir;

    fn sine_buffer(seconds: f64) -> AudioBuffer {
        use std::f32::consts::PI;
        let rate = 44_100u32;
        let samples = (0..(seconds * rate as f64) as usize)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / rate as f32).sin() * 0.5)
            .collect();
        AudioBuffer::new(samples, rate)
    }

    fn beat(time: f64, tier: SalienceTier) -> ClassifiedBeat {
        ClassifiedBeat {
            event: BeatEvent::new(time, 1),
            tier,
        }
    }

    #[test]
    fn marker_weight_is_monotone_in_tier() {
        let primary = marker_style(SalienceTier::Primary);
        let secondary = marker_style(SalienceTier::Secondary);
        let other = marker_style(SalienceTier::Other);
        assert!(primary.stroke_width >= secondary.stroke_width);
        assert!(secondary.stroke_width >= other.stroke_width);
        assert!(primary.color.3 > secondary.color.3);
        assert!(secondary.color.3 > other.color.3);
    }

    #[test]
    fn renders_png_with_markers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let audio = sine_buffer(2.0);
        let beats = vec![
            beat(0.5, SalienceTier::Primary),
            beat(1.0, SalienceTier::Secondary),
            beat(1.5, SalienceTier::Other),
        ];

        render(&audio, &beats, Pattern::Duple, &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "PNG must not be empty");
    }

    #[test]
    fn renders_with_zero_beats() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");
        render(&sine_buffer(1.0), &[], Pattern::Unknown, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn renders_empty_audio_without_panicking() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        let audio = AudioBuffer::new(vec![], 44_100);
        render(&audio, &[], Pattern::Unknown, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_is_render_sink_error() {
        let audio = sine_buffer(0.1);
        let err = render(
            &audio,
            &[],
            Pattern::Unknown,
            Path::new("/nonexistent-dir/out.png"),
        );
        assert!(matches!(err, Err(BeatmarkError::RenderSink { .. })));
    }

    #[test]
    fn envelope_has_one_segment_per_bin() {
        let audio = sine_buffer(1.0);
        let bin = (audio.len() / IMAGE_WIDTH as usize).max(1);
        let expected = audio.len().div_ceil(bin);
        assert_eq!(envelope(&audio).count(), expected);
    }
}
