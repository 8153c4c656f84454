//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// beatmark - Annotate audio with detected beats
///
/// Reads an audio (or audio-bearing video) file plus a pre-computed
/// beat-event file and writes three artifacts next to the input: an
/// annotated waveform PNG, a click-track WAV mix, and a JSON export of the
/// beat data.
#[derive(Parser, Debug)]
#[command(name = "beatmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Audio or audio-bearing video file to annotate
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Beat-event file: one "<seconds> <position>" pair per line
    /// (defaults to a "<AUDIO stem>.beats" sidecar next to the input)
    #[arg(value_name = "BEATS")]
    pub beats: Option<PathBuf>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audio_and_optional_beats() {
        let cli = Cli::parse_from(["beatmark", "track.mp3", "track.beats"]);
        assert_eq!(cli.audio, PathBuf::from("track.mp3"));
        assert_eq!(cli.beats, Some(PathBuf::from("track.beats")));

        let cli = Cli::parse_from(["beatmark", "track.mp3"]);
        assert_eq!(cli.beats, None);
    }

    #[test]
    fn rejects_missing_audio_argument() {
        assert!(Cli::try_parse_from(["beatmark"]).is_err());
    }

    #[test]
    fn rejects_excess_arguments() {
        assert!(Cli::try_parse_from(["beatmark", "a.mp3", "b.beats", "c.extra"]).is_err());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::parse_from(["beatmark", "-vv", "track.mp3"]);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }
}
