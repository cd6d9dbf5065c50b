//! FFmpeg subprocess handling for audio re-encoding

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{TranscodeError, Transcoder};
use crate::audio::TargetFormat;

/// Binary name used when no explicit path is configured
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Re-encodes files by running the ffmpeg command-line tool
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the configured binary, or `ffmpeg` from PATH
    pub fn from_config(program: Option<&Path>) -> Self {
        Self::new(program.unwrap_or(Path::new(DEFAULT_FFMPEG)))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check that the binary starts and answers `-version` successfully
    ///
    /// Returns the first line of its output.
    pub fn verify(&self) -> Result<String, TranscodeError> {
        let output = Command::new(&self.program)
            .arg("-version")
            .output()
            .map_err(|source| TranscodeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscodeError::Unusable {
                program: self.program.clone(),
                status: output.status.to_string(),
                detail: summarize_stderr(&stderr),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.lines().next().unwrap_or("unknown version").to_string();
        log::debug!("ffmpeg verified at {}: {}", self.program.display(), version);
        Ok(version)
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

/// Build the ffmpeg argument list for one file
///
/// -y                : Overwrite output file without asking
/// -v error          : Only print errors
/// -i <input>        : Input file
/// -ar <rate>        : Output sample rate
/// -ac <channels>    : Output channel count
/// -c:a <codec>      : Output PCM sample format
pub fn build_args(input: &Path, output: &Path, target: &TargetFormat) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-ar".into(),
        target.sample_rate.to_string().into(),
        "-ac".into(),
        target.channels.to_string().into(),
        "-c:a".into(),
        target.sample_format.codec_name().into(),
        output.as_os_str().to_owned(),
    ]
}

/// Pick the most useful line of ffmpeg's stderr for an error report
fn summarize_stderr(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .next_back()
        .unwrap_or("Unknown error")
        .to_string()
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: &TargetFormat,
    ) -> Result<(), TranscodeError> {
        let args = build_args(input, output, target);
        log::debug!("Running {} {:?}", self.program.display(), args);

        // Blocks until ffmpeg exits, no timeout
        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| TranscodeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        log::debug!("ffmpeg stderr for {}:\n{}", input.display(), stderr);
        Err(TranscodeError::EncodeFailed {
            path: input.to_path_buf(),
            status: result.status.to_string(),
            detail: summarize_stderr(&stderr),
        })
    }
}
