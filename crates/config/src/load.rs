//! Config loading with deterministic precedence.

use crate::{LoggerConfig, LoggerEnv};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Errors raised while reading or parsing a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file extension names a format the loader does not speak.
    #[error("unsupported config format `.{extension}`; use .json or .toml")]
    UnsupportedFormat {
        /// The offending extension.
        extension: String,
    },

    /// The file content is not valid JSON for the schema.
    #[error("invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The file content is not valid TOML for the schema.
    #[error("invalid config TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

/// Load the logger config from an optional file path, then apply env
/// overrides.
///
/// Precedence (highest wins): env overrides, file content, defaults. A
/// missing path means defaults plus env.
pub fn load_logger_config(
    config_path: Option<&Path>,
    env: &LoggerEnv,
) -> Result<LoggerConfig, ConfigError> {
    let mut config = match config_path {
        None => LoggerConfig::default(),
        Some(path) => {
            // Reject unsupported extensions before touching the filesystem.
            let format = detect_config_format(path)?;
            let content = read_config_file(path)?;
            parse_config(&content, format)?
        },
    };

    // env is applied last.
    env.apply(&mut config);
    Ok(config)
}

/// Load the logger config using the real process environment.
pub fn load_logger_config_std_env(config_path: Option<&Path>) -> Result<LoggerConfig, ConfigError> {
    load_logger_config(config_path, &LoggerEnv::from_std_env())
}

fn parse_config(input: &str, format: ConfigFormat) -> Result<LoggerConfig, ConfigError> {
    match format {
        ConfigFormat::Json => Ok(serde_json::from_str(input)?),
        ConfigFormat::Toml => Ok(toml::from_str(input)?),
    }
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ConfigError> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ConfigError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
