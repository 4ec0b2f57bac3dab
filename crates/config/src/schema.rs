//! Serde schema for the logger configuration file.

use serde::{Deserialize, Serialize};
use unilog_domain::{Destination, Encoding, FieldKeys};

/// Declarative logger configuration, deserializable from JSON or TOML.
///
/// All fields default, so a partial (or empty) document is valid. String
/// fields keep the raw descriptor form; the typed views below resolve them
/// into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Backend selector, resolved by the factory.
    pub backend: Box<str>,
    /// Minimum visible level descriptor.
    pub min_level: Box<str>,
    /// Destination descriptors; empty means console.
    pub destinations: Vec<Box<str>>,
    /// Output encoding descriptor.
    pub encoding: Box<str>,
    /// Reserved-key remapping for structured records.
    pub field_keys: FieldKeysConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            backend: "slog".into(),
            min_level: "info".into(),
            destinations: Vec::new(),
            encoding: "json".into(),
            field_keys: FieldKeysConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Resolve the destination descriptors into typed destinations.
    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations
            .iter()
            .map(|descriptor| Destination::parse(descriptor))
            .collect()
    }

    /// Resolve the encoding descriptor.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        Encoding::parse(&self.encoding)
    }

    /// Resolve the reserved-key remapping.
    #[must_use]
    pub fn field_keys(&self) -> FieldKeys {
        FieldKeys {
            timestamp: self.field_keys.timestamp.clone(),
            level: self.field_keys.level.clone(),
            message: self.field_keys.message.clone(),
        }
    }
}

/// Reserved-key section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FieldKeysConfig {
    /// Key the record timestamp is written under.
    pub timestamp: Box<str>,
    /// Key the mapped severity is written under.
    pub level: Box<str>,
    /// Key the message is written under.
    pub message: Box<str>,
}

impl Default for FieldKeysConfig {
    fn default() -> Self {
        let keys = FieldKeys::default();
        Self {
            timestamp: keys.timestamp,
            level: keys.level,
            message: keys.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_select_slog_info_console_json() {
        let config = LoggerConfig::default();
        assert_eq!(&*config.backend, "slog");
        assert_eq!(&*config.min_level, "info");
        assert!(config.destinations().is_empty());
        assert_eq!(config.encoding(), Encoding::Structured);
        assert_eq!(config.field_keys(), FieldKeys::default());
    }

    #[test]
    fn destinations_resolve_through_the_domain_parser() {
        let config = LoggerConfig {
            destinations: vec!["console".into(), "/var/log/app.log".into()],
            ..LoggerConfig::default()
        };
        assert_eq!(
            config.destinations(),
            vec![
                Destination::Console,
                Destination::File(PathBuf::from("/var/log/app.log")),
            ]
        );
    }

    #[test]
    fn camel_case_keys_deserialize() -> Result<(), serde_json::Error> {
        let config: LoggerConfig = serde_json::from_str(
            r#"{
              "backend": "env_logger",
              "minLevel": "debug",
              "encoding": "text",
              "fieldKeys": { "message": "message" }
            }"#,
        )?;
        assert_eq!(&*config.backend, "env_logger");
        assert_eq!(&*config.min_level, "debug");
        assert_eq!(config.encoding(), Encoding::Text);
        assert_eq!(&*config.field_keys().message, "message");
        assert_eq!(&*config.field_keys().timestamp, "@timestamp");
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<LoggerConfig, _> = serde_json::from_str(r#"{ "backends": "slog" }"#);
        assert!(result.is_err());
    }
}
