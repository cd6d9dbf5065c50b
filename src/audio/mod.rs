// Audio module - file selection, target format, and header probing

pub mod detection;
pub mod format;
pub mod metadata;

pub use detection::is_reencode_target;
pub use format::TargetFormat;
pub use metadata::probe_audio_format;
