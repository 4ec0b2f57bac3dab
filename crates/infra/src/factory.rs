//! Logger adapter selection and initialization.

use std::sync::Arc;
use unilog_adapters::{EnvLogger, EnvOptions, SlogLogger, SlogOptions};
use unilog_config::LoggerConfig;
use unilog_ports::{ConstructError, LogPort};

/// Backends the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The buffered structured engine.
    Slog,
    /// The `log`/`env_logger` engine.
    EnvLogger,
}

/// A built logger, kept as a concrete handle so the owner can close it.
///
/// Emitting goes through [`LoggerHandle::port`]; closing flushes buffered
/// records and, for the slog backend, retires the engine for good.
pub enum LoggerHandle {
    /// Handle to a [`SlogLogger`].
    Slog(Arc<SlogLogger>),
    /// Handle to an [`EnvLogger`].
    Env(Arc<EnvLogger>),
}

impl LoggerHandle {
    /// The port view of the handle, for code that only emits.
    #[must_use]
    pub fn port(&self) -> Arc<dyn LogPort> {
        match self {
            Self::Slog(logger) => {
                let port: Arc<SlogLogger> = Arc::clone(logger);
                port
            },
            Self::Env(logger) => {
                let port: Arc<EnvLogger> = Arc::clone(logger);
                port
            },
        }
    }

    /// Flush and release the underlying engine.
    pub fn close(&self) {
        match self {
            Self::Slog(logger) => logger.close(),
            Self::Env(logger) => logger.close(),
        }
    }
}

/// Build a logger using config settings.
pub fn build_logger(config: &LoggerConfig) -> Result<LoggerHandle, ConstructError> {
    let backend = parse_backend(&config.backend)?;
    match backend {
        BackendKind::Slog => {
            let adapter = SlogLogger::new(SlogOptions {
                min_level: config.min_level.clone(),
                destinations: config.destinations(),
                encoding: config.encoding(),
                field_keys: config.field_keys(),
            })?;
            Ok(LoggerHandle::Slog(Arc::new(adapter)))
        },
        BackendKind::EnvLogger => {
            let adapter = EnvLogger::new(EnvOptions {
                min_level: config.min_level.clone(),
                destinations: config.destinations(),
                encoding: config.encoding(),
                field_keys: config.field_keys(),
            })?;
            Ok(LoggerHandle::Env(Arc::new(adapter)))
        },
    }
}

/// Resolve a backend name. The empty string selects the default backend.
pub fn parse_backend(value: &str) -> Result<BackendKind, ConstructError> {
    let raw = value.trim();
    let normalized = raw.to_ascii_lowercase();
    match normalized.as_str() {
        "" | "slog" => Ok(BackendKind::Slog),
        "env" | "env_logger" | "env-logger" => Ok(BackendKind::EnvLogger),
        _ => Err(ConstructError::UnknownBackend {
            name: raw.to_string(),
        }),
    }
}
