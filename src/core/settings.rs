//! Optimizer settings
//!
//! Built-in defaults reproduce the asset pipeline's fixed behavior. A JSON
//! settings file may override any subset of fields; CLI flags are applied
//! on top of that in `main`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::audio::TargetFormat;

pub const DEFAULT_ROOT: &str = "src/assets/sounds/kits/default";
pub const DEFAULT_EXTENSION: &str = "wav";
pub const DEFAULT_TEMP_PREFIX: &str = "temp_";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one optimizer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Directory tree to scan
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// File extension selecting files to re-encode (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Prefix of the sibling file the encoder writes to
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
    /// Explicit ffmpeg binary; `None` looks it up on PATH
    #[serde(default)]
    pub ffmpeg: Option<PathBuf>,
    #[serde(default)]
    pub target: TargetFormat,
    /// Skip files whose header already matches `target`
    #[serde(default)]
    pub skip_conforming: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_temp_prefix() -> String {
    DEFAULT_TEMP_PREFIX.to_string()
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            temp_prefix: default_temp_prefix(),
            ffmpeg: None,
            target: TargetFormat::default(),
            skip_conforming: false,
        }
    }
}

impl OptimizerSettings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        fs::write(path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::SampleFormat;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_asset_pipeline() {
        let settings = OptimizerSettings::default();
        assert_eq!(settings.root, PathBuf::from("src/assets/sounds/kits/default"));
        assert_eq!(settings.extension, "wav");
        assert_eq!(settings.temp_prefix, "temp_");
        assert!(settings.ffmpeg.is_none());
        assert!(!settings.skip_conforming);
        assert_eq!(settings.target, TargetFormat::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("optimizer.json");

        let settings = OptimizerSettings {
            root: PathBuf::from("/assets/kits"),
            ffmpeg: Some(PathBuf::from("/usr/local/bin/ffmpeg")),
            skip_conforming: true,
            ..Default::default()
        };

        settings.save(&path).unwrap();
        assert!(path.exists());

        let loaded = OptimizerSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("optimizer.json");
        fs::write(
            &path,
            r#"{ "root": "sounds", "target": { "sample_format": "pcm_s24le" } }"#,
        )
        .unwrap();

        let loaded = OptimizerSettings::load(&path).unwrap();
        assert_eq!(loaded.root, PathBuf::from("sounds"));
        assert_eq!(loaded.extension, "wav");
        assert_eq!(loaded.target.sample_rate, 22050);
        assert_eq!(loaded.target.sample_format, SampleFormat::S24Le);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            OptimizerSettings::load(&missing),
            Err(SettingsError::Read { .. })
        ));

        let bad = temp_dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            OptimizerSettings::load(&bad),
            Err(SettingsError::Parse { .. })
        ));
    }
}
