//! Audio decoding using symphonia
//!
//! Decodes the first audio track of any supported container (plain audio
//! files and audio-bearing video alike) to mono f32 samples at the fixed
//! output rate. Uses rubato for resampling with proper anti-aliasing.

use crate::error::{BeatmarkError, Result};
use crate::types::AudioBuffer;
use rubato::{FftFixedInOut, Resampler};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, trace};

/// Sample rate of the decoded buffer and the rendered click-track mix.
///
/// Unlike an analysis-only pipeline, the decoded buffer here is the base of
/// an audible output artifact, so it is kept at standard CD rate rather
/// than a reduced analysis rate.
pub const OUTPUT_SAMPLE_RATE: u32 = 44_100;

/// Decode an audio (or audio-bearing video) file to a mono AudioBuffer
pub fn decode(path: &Path) -> Result<AudioBuffer> {
    let file = std::fs::File::open(path)
        .map_err(|e| BeatmarkError::decode_error(path, format!("Failed to open file: {}", e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the probe with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| BeatmarkError::decode_error(path, format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // First decodable audio track. For video containers this skips the
    // video track and lands on the soundtrack.
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| BeatmarkError::decode_error(path, "No audio tracks found"))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_sample_rate = codec_params.sample_rate.unwrap_or(44_100);
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(2);

    debug!(
        "Decoding: {} @ {}Hz, {} channels",
        path.display(),
        source_sample_rate,
        channels
    );

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| {
            BeatmarkError::decode_error(path, format!("Failed to create decoder: {}", e))
        })?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // End of stream
            }
            Err(e) => {
                return Err(BeatmarkError::decode_error(
                    path,
                    format!("Failed to read packet: {}", e),
                ));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                // Skip corrupted frames
                trace!("Skipping corrupted frame: {}", e);
                continue;
            }
            Err(e) => {
                return Err(BeatmarkError::decode_error(
                    path,
                    format!("Decode error: {}", e),
                ));
            }
        };

        let spec = *decoded.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        all_samples.extend(to_mono(sample_buf.samples(), channels));
    }

    let final_samples = if source_sample_rate != OUTPUT_SAMPLE_RATE {
        resample(&all_samples, source_sample_rate, OUTPUT_SAMPLE_RATE)
    } else {
        all_samples
    };

    debug!(
        "Decoded {} samples ({:.2}s)",
        final_samples.len(),
        final_samples.len() as f64 / OUTPUT_SAMPLE_RATE as f64
    );

    Ok(AudioBuffer::new(final_samples, OUTPUT_SAMPLE_RATE))
}

/// Convert interleaved multi-channel audio to mono by averaging channels
fn to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// FFT-based resampling with an anti-aliasing filter.
///
/// Falls back to linear interpolation if rubato cannot be initialized for
/// the rate pair (exotic source rates); the fallback may alias but keeps
/// the run alive.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    const CHUNK_SIZE: usize = 1024;

    let mut resampler =
        match FftFixedInOut::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 1) {
            Ok(r) => r,
            Err(e) => {
                debug!("Rubato initialization failed ({}), using fallback", e);
                return resample_linear_fallback(samples, from_rate, to_rate);
            }
        };

    let input_frames = resampler.input_frames_next();
    let output_frames = resampler.output_frames_next();
    let ratio = to_rate as f64 / from_rate as f64;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize);
    let mut pos = 0;
    while pos < samples.len() {
        let end = (pos + input_frames).min(samples.len());
        let mut chunk = samples[pos..end].to_vec();
        if chunk.len() < input_frames {
            chunk.resize(input_frames, 0.0);
        }

        match resampler.process(&[chunk], None) {
            Ok(resampled) => {
                if let Some(channel) = resampled.first() {
                    // Trim the padding's contribution off the final chunk
                    let valid = if pos + input_frames > samples.len() {
                        let input_valid = samples.len() - pos;
                        ((input_valid as f64 * ratio).ceil() as usize).min(output_frames)
                    } else {
                        output_frames
                    };
                    output.extend_from_slice(&channel[..valid.min(channel.len())]);
                }
            }
            Err(e) => {
                debug!("Rubato processing error ({}), using fallback for remaining", e);
                output.extend(resample_linear_fallback(&samples[pos..], from_rate, to_rate));
                break;
            }
        }

        pos += input_frames;
    }

    output
}

/// Linear interpolation resampler, used only when rubato is unavailable
fn resample_linear_fallback(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < samples.len() {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else {
            samples[src_idx.min(samples.len() - 1)]
        };

        output.push(sample);
    }

    output
}
