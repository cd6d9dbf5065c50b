//! Core application settings
//!
//! Run-wide configuration shared by the CLI and the batch re-encoder.

mod settings;

pub use settings::{DEFAULT_ROOT, OptimizerSettings, SettingsError};
