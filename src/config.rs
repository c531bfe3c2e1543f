//! Command-line surface and validated run configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_INPUT_FILE: &str = "events.txt";
pub const DEFAULT_WINDOW_SIZE: i64 = 10;

/// Raw command-line arguments, before validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "delivery-time-analyzer",
    about = "Per-minute moving average of translation delivery times"
)]
pub struct Cli {
    /// Path to the input file (one JSON event per line)
    #[arg(long = "input_file", default_value = DEFAULT_INPUT_FILE)]
    pub input_file: PathBuf,

    /// Window size in minutes
    #[arg(
        long = "window_size",
        default_value_t = DEFAULT_WINDOW_SIZE,
        allow_negative_numbers = true
    )]
    pub window_size: i64,

    /// Emit diagnostics on stderr as JSON lines instead of compact text
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_file: PathBuf,
    pub window_minutes: u32,
}

impl Cli {
    pub fn validate(&self) -> Result<Config> {
        Config::new(self.input_file.clone(), self.window_size)
    }
}

impl Config {
    pub fn new(input_file: PathBuf, window_size: i64) -> Result<Self> {
        if input_file.as_os_str().is_empty() {
            return Err(Error::Config("input_file is required".into()));
        }
        if window_size <= 0 {
            return Err(Error::Config(format!(
                "window_size should be greater than 0 (got {window_size})"
            )));
        }
        let window_minutes = u32::try_from(window_size).map_err(|_| {
            Error::Config(format!("window_size {window_size} is too large"))
        })?;

        Ok(Self {
            input_file,
            window_minutes,
        })
    }
}
