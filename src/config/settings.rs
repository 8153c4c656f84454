//! Runtime configuration settings

use std::path::{Path, PathBuf};

/// Suffix appended to the audio base name for every artifact
const OUTPUT_SUFFIX: &str = "_beat-analysis";

/// Runtime settings for one pipeline run.
///
/// All paths are resolved here, once; the pipeline and sinks only consume
/// them. Artifact names derive deterministically from the audio base name.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Input audio (or audio-bearing video) file
    pub audio: PathBuf,
    /// Beat-event text file
    pub beats: PathBuf,
    /// Annotated waveform PNG
    pub image_out: PathBuf,
    /// Click-track WAV mix
    pub audio_out: PathBuf,
    /// JSON export
    pub export_out: PathBuf,
}

impl Settings {
    /// Resolve settings for an input file.
    ///
    /// The beat file defaults to the `<stem>.beats` sidecar next to the
    /// audio; artifacts land in `output_dir` (or beside the input when
    /// `None`) as `<stem>_beat-analysis.{png,wav,json}`.
    pub fn for_input(audio: &Path, beats: Option<&Path>) -> Self {
        Self::resolve(audio, beats, None)
    }

    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self::resolve(&cli.audio, cli.beats.as_deref(), cli.output.as_deref())
    }

    fn resolve(audio: &Path, beats: Option<&Path>, output_dir: Option<&Path>) -> Self {
        let stem = audio
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output")
            .to_string();

        let beats = beats
            .map(Path::to_path_buf)
            .unwrap_or_else(|| audio.with_extension("beats"));

        let dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| audio.parent().unwrap_or(Path::new(".")).to_path_buf());

        let base = dir.join(format!("{}{}", stem, OUTPUT_SUFFIX));

        Self {
            audio: audio.to_path_buf(),
            beats,
            image_out: base.with_extension("png"),
            audio_out: base.with_extension("wav"),
            export_out: base.with_extension("json"),
        }
    }
}
