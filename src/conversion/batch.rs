//! Batch re-encoding of a directory tree
//!
//! Core principle: one file at a time, original untouched until the encoder
//! has succeeded. Targets are collected up front so temp files created during
//! the run are never picked up as inputs.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::staging::{replace_original, temp_path_for};
use super::{BatchError, TranscodeError, Transcoder};
use crate::audio::{is_reencode_target, probe_audio_format};
use crate::core::OptimizerSettings;

/// Events emitted while a batch runs
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Scan of the root directory is about to start
    ScanStarted { root: &'a Path },
    /// About to re-encode a file
    Processing { path: &'a Path },
    /// File was re-encoded and replaced
    Optimized { path: &'a Path },
    /// File already had the target format and was skipped
    AlreadyOptimized { path: &'a Path },
    /// Encoder rejected the file; the original is unchanged
    Failed {
        path: &'a Path,
        error: &'a TranscodeError,
    },
    /// Every target has been attempted
    Finished { summary: &'a BatchSummary },
}

/// What happened to a single file
#[derive(Debug)]
pub enum FileOutcome {
    Optimized,
    AlreadyOptimized,
    Failed(TranscodeError),
}

/// Counts for a finished run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub discovered: usize,
    pub optimized: usize,
    pub skipped: usize,
    pub failed: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl BatchSummary {
    fn started(discovered: usize) -> Self {
        let now = Local::now();
        Self {
            discovered,
            optimized: 0,
            skipped: 0,
            failed: 0,
            started_at: now,
            finished_at: now,
        }
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Optimized => self.optimized += 1,
            FileOutcome::AlreadyOptimized => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Re-encodes every matching file under a root directory in place
pub struct BatchReencoder<T: Transcoder> {
    transcoder: T,
    settings: OptimizerSettings,
}

impl<T: Transcoder> BatchReencoder<T> {
    pub fn new(transcoder: T, settings: OptimizerSettings) -> Self {
        Self {
            transcoder,
            settings,
        }
    }

    /// Find every file under `root` that should be re-encoded
    ///
    /// Temp-prefixed files are excluded. Directory symlinks are not followed;
    /// symlinks to files count as files.
    pub fn collect_targets(&self, root: &Path) -> Result<Vec<PathBuf>, BatchError> {
        if !root.is_dir() {
            return Err(BatchError::NotADirectory(root.to_path_buf()));
        }

        let mut targets = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file
                && is_reencode_target(
                    entry.path(),
                    &self.settings.extension,
                    &self.settings.temp_prefix,
                )
            {
                targets.push(entry.into_path());
            }
        }

        log::debug!("Found {} target file(s) under {}", targets.len(), root.display());
        Ok(targets)
    }

    fn is_conforming(&self, path: &Path) -> bool {
        match probe_audio_format(path) {
            Ok(info) => info.matches(&self.settings.target),
            Err(e) => {
                log::debug!("Could not probe {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Re-encode one file and replace the original on success
    ///
    /// Encoder rejections come back as `FileOutcome::Failed`. Anything that
    /// should stop the whole run (encoder missing, rename failure) is an `Err`.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, BatchError> {
        if self.settings.skip_conforming && self.is_conforming(path) {
            return Ok(FileOutcome::AlreadyOptimized);
        }

        let temp_path = temp_path_for(path, &self.settings.temp_prefix);
        match self
            .transcoder
            .transcode(path, &temp_path, &self.settings.target)
        {
            Ok(()) => {
                replace_original(&temp_path, path)?;
                Ok(FileOutcome::Optimized)
            }
            Err(e) if e.is_recoverable() => Ok(FileOutcome::Failed(e)),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-encode every target under `root`, reporting progress through `on_event`
    pub fn run<F>(&self, root: &Path, mut on_event: F) -> Result<BatchSummary, BatchError>
    where
        F: FnMut(&BatchEvent),
    {
        on_event(&BatchEvent::ScanStarted { root });

        let targets = self.collect_targets(root)?;
        let mut summary = BatchSummary::started(targets.len());

        for path in &targets {
            on_event(&BatchEvent::Processing { path });

            let outcome = self.process_file(path)?;
            match &outcome {
                FileOutcome::Optimized => on_event(&BatchEvent::Optimized { path }),
                FileOutcome::AlreadyOptimized => {
                    on_event(&BatchEvent::AlreadyOptimized { path })
                }
                FileOutcome::Failed(error) => {
                    log::warn!("Encoder rejected {}: {}", path.display(), error);
                    on_event(&BatchEvent::Failed { path, error })
                }
            }
            summary.record(&outcome);
        }

        summary.finished_at = Local::now();
        log::debug!(
            "Batch finished in {:.1}s: {} discovered, {} optimized, {} skipped, {} failed",
            summary.elapsed_secs(),
            summary.discovered,
            summary.optimized,
            summary.skipped,
            summary.failed
        );
        on_event(&BatchEvent::Finished { summary: &summary });
        Ok(summary)
    }
}
