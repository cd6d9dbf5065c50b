//! Logging configuration for the WAV optimizer
//!
//! Diagnostics go to stderr so they never interleave with the progress lines
//! on stdout. With `--log-file`, a debug-level copy is appended to a file,
//! by default under the platform's local data directory.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "wav-optimizer.log";
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Get the default log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("wav-optimizer").join("logs"))
}

/// Get the default log file path
pub fn get_log_file_path() -> Option<PathBuf> {
    get_log_directory().map(|d| d.join(LOG_FILE_NAME))
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Rotate the log to `<name>.old` once it grows past 10MB
fn rotate_if_large(log_path: &Path) {
    if let Ok(metadata) = fs::metadata(log_path)
        && metadata.len() > MAX_LOG_SIZE
    {
        let mut backup = log_path.as_os_str().to_owned();
        backup.push(".old");
        let _ = fs::rename(log_path, PathBuf::from(backup));
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Show debug messages on the terminal
/// * `log_file` - `None` for terminal only, `Some(None)` for the default
///   file location, `Some(Some(path))` for an explicit file
///
/// Returns the path of the log file actually opened, if any
pub fn init_logging(verbose: bool, log_file: Option<Option<PathBuf>>) -> Option<PathBuf> {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let log_path = log_file.and_then(|explicit| explicit.or_else(get_log_file_path));
    let opened = log_path.and_then(|path| match open_log_file(&path) {
        Ok(file) => {
            loggers.push(WriteLogger::new(LevelFilter::Debug, log_config(), file));
            Some(path)
        }
        Err(e) => {
            eprintln!("Warning: Could not open log file {}: {}", path.display(), e);
            None
        }
    });

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    if let Some(path) = &opened {
        log::debug!("=== WAV optimizer session started ===");
        log::debug!("Log file: {}", path.display());
    }

    opened
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    rotate_if_large(path);
    OpenOptions::new().create(true).append(true).open(path)
}
