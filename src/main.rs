//! WAV optimizer
//!
//! Re-encodes every WAV file under a directory tree in place to
//! 22050 Hz, stereo, 16-bit PCM using ffmpeg.

mod audio;
mod cli;
mod conversion;
mod core;
mod logging;
#[cfg(test)]
mod test_fixtures;

use std::path::Path;
use std::process::ExitCode;

use crate::cli::Command;
use crate::conversion::{BatchError, BatchEvent, BatchReencoder, FfmpegTranscoder};
use crate::core::{OptimizerSettings, SettingsError};

/// Human-readable progress line for one batch event
fn progress_line(event: &BatchEvent, extension: &str) -> String {
    let name = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string())
    };
    match event {
        BatchEvent::ScanStarted { root } => format!(
            "Optimizing {} files in {}...",
            extension.trim_start_matches('.').to_uppercase(),
            root.display()
        ),
        BatchEvent::Processing { path } => format!("Processing {}...", path.display()),
        BatchEvent::Optimized { path } => format!("Optimized: {}", name(path)),
        BatchEvent::AlreadyOptimized { path } => format!("Already optimized: {}", name(path)),
        BatchEvent::Failed { path, error } => {
            format!("Error processing {}: {}", name(path), error)
        }
        BatchEvent::Finished { .. } => "Done.".to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Batch(#[from] BatchError),
}

fn run(args: cli::Args) -> Result<(), AppError> {
    let mut settings = match &args.config {
        Some(path) => OptimizerSettings::load(path)?,
        None => OptimizerSettings::default(),
    };
    args.apply_to(&mut settings);

    if let Some(path) = &args.write_config {
        settings.save(path)?;
        log::info!("Wrote settings to {}", path.display());
        return Ok(());
    }

    let transcoder = FfmpegTranscoder::from_config(settings.ffmpeg.as_deref());
    let version = transcoder
        .verify()
        .map_err(|e| AppError::Batch(e.into()))?;
    log::debug!("Using {} ({})", transcoder.program().display(), version);
    log::debug!("Target format: {}", settings.target);

    let root = settings.root.clone();
    let extension = settings.extension.clone();
    let reencoder = BatchReencoder::new(transcoder, settings);
    reencoder.run(&root, |event| println!("{}", progress_line(event, &extension)))?;
    Ok(())
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let args = match cli::parse_args(&argv) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help(usage)) => {
            println!("{}", usage);
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(args.verbose, args.log_file.clone());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
