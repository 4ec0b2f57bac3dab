//! CLI binary entrypoint.
//!
//! Builds a logger from config file, environment, and flags, then emits a
//! short demonstration sequence so the output of every backend and encoding
//! can be eyeballed quickly.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use unilog_config::{LoggerConfig, load_logger_config_std_env};
use unilog_domain::context;

#[derive(Debug, Parser)]
#[command(
    name = "unilog",
    version,
    about = "Structured logging demo CLI",
    long_about = None
)]
struct Cli {
    /// Optional config file path (JSON/TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend selector (`slog`, `env_logger`). Overrides config and env.
    #[arg(long)]
    backend: Option<String>,
    /// Minimum visible level (`trace` through `panic`).
    #[arg(long)]
    level: Option<String>,
    /// Destination descriptor; repeat for fan-out. `console` means stdout.
    #[arg(long = "destination")]
    destinations: Vec<String>,
    /// Output encoding (`json` or `text`).
    #[arg(long)]
    encoding: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("unilog: {error}");
            ExitCode::FAILURE
        },
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_logger_config_std_env(cli.config.as_deref())?;
    apply_flags(&mut config, &cli);

    let handle = unilog_infra::build_logger(&config)?;
    let logger = handle.port();

    logger.emit("info", "I am info, hear me roar!", &[Some(context! {
        "extras" => "yes",
    })])?;
    logger.emit("error", "A scary error!", &[Some(context! {
        "number" => 42,
        "details" => context! { "retryable" => false },
    })])?;
    logger.emit("trace", "I should be invisible!", &[Some(context! {
        "wha" => "me too",
    })])?;

    handle.close();
    Ok(())
}

// Flags win over both the config file and env overrides.
fn apply_flags(config: &mut LoggerConfig, cli: &Cli) {
    if let Some(backend) = cli.backend.as_deref() {
        config.backend = backend.into();
    }
    if let Some(level) = cli.level.as_deref() {
        config.min_level = level.into();
    }
    if !cli.destinations.is_empty() {
        config.destinations = cli
            .destinations
            .iter()
            .map(|descriptor| descriptor.as_str().into())
            .collect();
    }
    if let Some(encoding) = cli.encoding.as_deref() {
        config.encoding = encoding.into();
    }
}
