//! Audio re-encoding module
//!
//! Re-encodes audio files in place using ffmpeg behind the `Transcoder` trait.

mod batch;
mod error;
mod ffmpeg;
mod staging;
mod transcoder;

pub use batch::{BatchEvent, BatchReencoder};
pub use error::{BatchError, TranscodeError};
pub use ffmpeg::FfmpegTranscoder;
pub use transcoder::Transcoder;
