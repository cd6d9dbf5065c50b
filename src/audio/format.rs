//! Target output format for re-encoded files

use serde::{Deserialize, Serialize};

/// PCM sample layouts the encoder can be asked to produce
///
/// Serialized as the ffmpeg codec name so settings files read the same way
/// as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SampleFormat {
    /// 16-bit signed little-endian
    #[default]
    #[serde(rename = "pcm_s16le")]
    S16Le,
    /// 24-bit signed little-endian
    #[serde(rename = "pcm_s24le")]
    S24Le,
    /// 32-bit float little-endian
    #[serde(rename = "pcm_f32le")]
    F32Le,
}

impl SampleFormat {
    /// Codec name as understood by ffmpeg's `-c:a`
    pub fn codec_name(&self) -> &'static str {
        match self {
            SampleFormat::S16Le => "pcm_s16le",
            SampleFormat::S24Le => "pcm_s24le",
            SampleFormat::F32Le => "pcm_f32le",
        }
    }

    pub fn bits_per_sample(&self) -> u32 {
        match self {
            SampleFormat::S16Le => 16,
            SampleFormat::S24Le => 24,
            SampleFormat::F32Le => 32,
        }
    }
}

/// Sample rate, channel count and sample format every file is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFormat {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_channels")]
    pub channels: u16,
    #[serde(default)]
    pub sample_format: SampleFormat,
}

fn default_sample_rate() -> u32 {
    22050
}

fn default_channels() -> u16 {
    2
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            sample_format: SampleFormat::default(),
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}",
            self.sample_rate,
            self.channels,
            self.sample_format.codec_name()
        )
    }
}
