//! Command-line arguments

use getopts::Options;
use std::path::PathBuf;

use crate::core::{DEFAULT_ROOT, OptimizerSettings};

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
    pub skip_conforming: bool,
    pub verbose: bool,
    /// `Some(None)` means "log to the default file"
    pub log_file: Option<Option<PathBuf>>,
    pub write_config: Option<PathBuf>,
}

/// What `main` should do after parsing
#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Args),
    Help(String),
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Print this help and exit");
    opts.optopt("c", "config", "Load settings from a JSON file", "PATH");
    opts.optopt("", "ffmpeg", "Path to the ffmpeg binary (default: ffmpeg on PATH)", "PATH");
    opts.optflag(
        "",
        "skip-conforming",
        "Skip files that are already at the target format",
    );
    opts.optflag("v", "verbose", "Show debug messages");
    opts.optflagopt("l", "log-file", "Also write a debug log to PATH", "PATH");
    opts.optopt(
        "",
        "write-config",
        "Write the effective settings to PATH and exit",
        "PATH",
    );
    opts
}

fn usage(program: &str) -> String {
    let brief = format!(
        "Usage: {} [OPTIONS] [ROOT]\n\nRe-encodes every WAV file under ROOT (default: {}) in place.",
        program, DEFAULT_ROOT
    );
    options().usage(&brief)
}

/// Parse arguments; `args[0]` is the program name
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let program = args.first().map(String::as_str).unwrap_or("wav-optimizer");
    let matches = options()
        .parse(args.iter().skip(1))
        .map_err(|f| format!("{}\n\n{}", f, usage(program)))?;

    if matches.opt_present("h") {
        return Ok(Command::Help(usage(program)));
    }

    if matches.free.len() > 1 {
        return Err(format!(
            "Expected at most one ROOT, got {}\n\n{}",
            matches.free.len(),
            usage(program)
        ));
    }

    let log_file = if matches.opt_present("log-file") {
        Some(matches.opt_str("log-file").map(PathBuf::from))
    } else {
        None
    };

    Ok(Command::Run(Args {
        root: matches.free.first().map(PathBuf::from),
        config: matches.opt_str("config").map(PathBuf::from),
        ffmpeg: matches.opt_str("ffmpeg").map(PathBuf::from),
        skip_conforming: matches.opt_present("skip-conforming"),
        verbose: matches.opt_present("verbose"),
        log_file,
        write_config: matches.opt_str("write-config").map(PathBuf::from),
    }))
}

impl Args {
    /// Apply command-line overrides on top of file or default settings
    pub fn apply_to(&self, settings: &mut OptimizerSettings) {
        if let Some(root) = &self.root {
            settings.root = root.clone();
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.ffmpeg = Some(ffmpeg.clone());
        }
        if self.skip_conforming {
            settings.skip_conforming = true;
        }
    }
}
