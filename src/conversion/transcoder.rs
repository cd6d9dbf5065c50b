use std::path::Path;

use super::TranscodeError;
use crate::audio::TargetFormat;

/// Something that can re-encode one audio file into another
///
/// Implementations must overwrite `output` if it already exists and must
/// leave `input` untouched.
pub trait Transcoder {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: &TargetFormat,
    ) -> Result<(), TranscodeError>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: &TargetFormat,
    ) -> Result<(), TranscodeError> {
        (**self).transcode(input, output, target)
    }
}
