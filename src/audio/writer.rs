//! WAV output using hound
//!
//! The click-track mix is written as mono 16-bit PCM at the buffer's sample
//! rate. Sample count in equals sample count out; the duration contract
//! belongs to the renderer, not to this writer.

use crate::error::{BeatmarkError, Result};
use crate::types::AudioBuffer;
use std::path::Path;
use tracing::info;

/// Write an audio buffer as a mono 16-bit PCM WAV file
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| BeatmarkError::render_sink(path, e))?;

    for &sample in &buffer.samples {
        // 32768 scaling matches the decoder's i16 -> f32 convention, so an
        // unmodified buffer round-trips to identical PCM words
        let scaled = (sample * 32768.0).round().clamp(i16::MIN as f32, i16::MAX as f32);
        writer
            .write_sample(scaled as i16)
            .map_err(|e| BeatmarkError::render_sink(path, e))?;
    }

    writer
        .finalize()
        .map_err(|e| BeatmarkError::render_sink(path, e))?;

    info!(
        "Wrote {} samples ({:.2}s) to {}",
        buffer.len(),
        buffer.duration,
        path.display()
    );
    Ok(())
}
