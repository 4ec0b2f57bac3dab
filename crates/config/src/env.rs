//! Process environment overrides, applied on top of file content.

use crate::LoggerConfig;

/// Environment override set for the logger configuration.
///
/// Captured as a plain struct so loading stays deterministic and testable
/// without touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// `UNILOG_BACKEND`
    pub backend: Option<Box<str>>,
    /// `UNILOG_LEVEL`
    pub min_level: Option<Box<str>>,
    /// `UNILOG_DESTINATIONS` (comma-separated descriptors)
    pub destinations: Option<Vec<Box<str>>>,
    /// `UNILOG_ENCODING`
    pub encoding: Option<Box<str>>,
}

impl LoggerEnv {
    /// Read the override set from the process environment.
    #[must_use]
    pub fn from_std_env() -> Self {
        Self {
            backend: read_var("UNILOG_BACKEND"),
            min_level: read_var("UNILOG_LEVEL"),
            destinations: read_var("UNILOG_DESTINATIONS").map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(Into::into)
                    .collect()
            }),
            encoding: read_var("UNILOG_ENCODING"),
        }
    }

    /// Apply the overrides to a config. Unset variables leave the config
    /// untouched.
    pub fn apply(&self, config: &mut LoggerConfig) {
        if let Some(backend) = self.backend.as_deref() {
            config.backend = backend.into();
        }
        if let Some(min_level) = self.min_level.as_deref() {
            config.min_level = min_level.into();
        }
        if let Some(destinations) = self.destinations.as_ref() {
            config.destinations = destinations.clone();
        }
        if let Some(encoding) = self.encoding.as_deref() {
            config.encoding = encoding.into();
        }
    }
}

fn read_var(name: &str) -> Option<Box<str>> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Into::into)
}
