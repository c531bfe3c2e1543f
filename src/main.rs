//! Delivery Time Analyzer — Binary Entrypoint
//! Reads translation events, prints one moving-average record per minute.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use delivery_time_analyzer::{pipeline, Cli, Config};

/// Diagnostics go to stderr; stdout carries only output records.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("delivery_time_analyzer=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = match cli.validate() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("Error: {e}");
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&config) {
        error!(error = %format!("{e:#}"), "run failed");
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(config: &Config) -> anyhow::Result<()> {
    let stdout = io::stdout();
    pipeline::run(config, BufWriter::new(stdout.lock()))
        .with_context(|| format!("processing {}", config.input_file.display()))?;
    Ok(())
}
