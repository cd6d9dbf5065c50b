//! Error types for transcoding and batch runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a single transcoder invocation
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The encoder ran but exited with a non-zero status
    #[error("{status}: {detail}")]
    EncodeFailed {
        path: PathBuf,
        status: String,
        detail: String,
    },

    /// The encoder starts but fails its version check
    #[error("{} is not a working encoder ({status}): {detail}", .program.display())]
    Unusable {
        program: PathBuf,
        status: String,
        detail: String,
    },

    /// The encoder process could not be started
    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranscodeError {
    /// Per-file failures are reported and skipped; everything else ends the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TranscodeError::EncodeFailed { .. })
    }
}

/// Errors that stop a batch run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to scan directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to replace {} with {}: {source}", .to.display(), .from.display())]
    Replace {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transcoder(#[from] TranscodeError),
}
