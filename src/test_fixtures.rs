//! Test fixtures for re-encoding tests
//!
//! Writes small PCM WAV files byte by byte so tests don't depend on an
//! encoder being installed, and provides a fake `Transcoder`.

#![cfg(test)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::audio::TargetFormat;
use crate::conversion::{TranscodeError, Transcoder};

/// Write a 16-bit PCM WAV file containing a simple ramp
///
/// # Arguments
/// * `path` - Destination file (overwritten)
/// * `sample_rate` - Sample rate in Hz
/// * `channels` - Interleaved channel count
/// * `frames` - Number of sample frames
pub fn write_pcm16_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
    let block_align = channels * 2;
    let data_len = frames * block_align as u32;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for frame in 0..frames {
        let sample = ((frame % 256) as i16 - 128) * 64;
        for _ in 0..channels {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
    }

    fs::write(path, bytes).expect("Failed to write WAV fixture");
}

/// Returns true if an `ffmpeg` binary is runnable from PATH
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// A recorded call to `FakeTranscoder::transcode`
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target: TargetFormat,
}

/// Transcoder double that records its calls
///
/// On success it writes a conforming WAV to the output path. Inputs whose
/// file name is listed in `reject` fail like a non-zero encoder exit.
#[derive(Default)]
pub struct FakeTranscoder {
    pub calls: RefCell<Vec<TranscodeCall>>,
    reject: HashSet<String>,
    missing_binary: bool,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every input with the given file name
    pub fn rejecting(mut self, file_name: &str) -> Self {
        self.reject.insert(file_name.to_string());
        self
    }

    /// Behave as if the encoder binary could not be started
    pub fn missing_binary() -> Self {
        Self {
            missing_binary: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn inputs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|c| c.input.clone()).collect()
    }
}

impl Transcoder for FakeTranscoder {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: &TargetFormat,
    ) -> Result<(), TranscodeError> {
        self.calls.borrow_mut().push(TranscodeCall {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            target: *target,
        });

        if self.missing_binary {
            return Err(TranscodeError::Spawn {
                program: PathBuf::from("fake-ffmpeg"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.reject.contains(&name) {
            return Err(TranscodeError::EncodeFailed {
                path: input.to_path_buf(),
                status: "exit status: 1".to_string(),
                detail: "Invalid data found when processing input".to_string(),
            });
        }

        write_pcm16_wav(output, target.sample_rate, target.channels, 64);
        Ok(())
    }
}
