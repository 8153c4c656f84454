//! beatmark CLI entry point

use beatmark::config::{Cli, Settings};
use beatmark::pipeline;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    // Build settings from CLI
    let settings = Settings::from_cli(&cli);

    // Validate inputs
    if let Err(e) = validate_inputs(&settings) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Run the pipeline
    match pipeline::run(&settings) {
        Ok(summary) => {
            println!();
            println!(
                "Annotated {} beats (pattern: {})",
                summary.beat_count, summary.pattern
            );
            println!("  Waveform plot:    {}", summary.image.display());
            println!("  Audio with beats: {}", summary.audio.display());
            println!("  Beat data:        {}", summary.export.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = if cli.quiet { "error" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(settings: &Settings) -> Result<(), String> {
    if !settings.audio.exists() {
        return Err(format!(
            "Input file does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Examples:\n    beatmark track.mp3 track.beats\n    beatmark concert.mp4 -o ./annotated",
            settings.audio.display()
        ));
    }

    if !settings.beats.exists() {
        return Err(format!(
            "Beat-event file does not exist: {}\n\n  Tip: Pass it as the second argument, or place a \"{}\" sidecar\n  next to the audio. The format is one \"<seconds> <position>\" pair per line.",
            settings.beats.display(),
            settings
                .beats
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<stem>.beats".into())
        ));
    }

    Ok(())
}
