use std::fs::File;
use std::path::Path;
use symphonia::core::codecs::{
    CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_PCM_S24LE, CodecType,
};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::format::{SampleFormat, TargetFormat};

/// Format of an audio file as reported by its container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormatInfo {
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub bits_per_sample: Option<u32>,
    /// ffmpeg-style codec name, e.g. "pcm_s16le"
    pub codec: String,
}

impl AudioFormatInfo {
    /// Returns true if the file is already at the target rate, channel count and sample format
    pub fn matches(&self, target: &TargetFormat) -> bool {
        self.sample_rate == Some(target.sample_rate)
            && self.channels == Some(target.channels)
            && self.codec == target.sample_format.codec_name()
            && self
                .bits_per_sample
                .is_none_or(|bits| bits == target.sample_format.bits_per_sample())
    }
}

fn codec_name(codec: CodecType) -> String {
    let known = [SampleFormat::S16Le, SampleFormat::S24Le, SampleFormat::F32Le]
        .into_iter()
        .find(|f| codec_type_for(*f) == codec);
    match known {
        Some(format) => format.codec_name().to_string(),
        None => format!("{:?}", codec).to_lowercase(),
    }
}

fn codec_type_for(format: SampleFormat) -> CodecType {
    match format {
        SampleFormat::S16Le => CODEC_TYPE_PCM_S16LE,
        SampleFormat::S24Le => CODEC_TYPE_PCM_S24LE,
        SampleFormat::F32Le => CODEC_TYPE_PCM_F32LE,
    }
}

/// Read sample rate, channel count and codec from an audio file header
pub fn probe_audio_format(path: &Path) -> Result<AudioFormatInfo, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(&ext.to_string_lossy());
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| format!("Failed to probe audio format: {}", e))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No default track found".to_string())?;
    let params = &track.codec_params;

    Ok(AudioFormatInfo {
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count() as u16),
        bits_per_sample: params.bits_per_sample,
        codec: codec_name(params.codec),
    })
}
