//! # unilog-config
//!
//! Declarative configuration for the logging stack: a serde schema shared by
//! JSON and TOML files, a loader with deterministic precedence, and process
//! environment overrides.
//!
//! Precedence (highest wins):
//! - env overrides (`LoggerEnv`)
//! - config file content
//! - defaults (`LoggerConfig::default()`)

mod env;
mod load;
mod schema;

pub use env::LoggerEnv;
pub use load::{ConfigError, load_logger_config, load_logger_config_std_env};
pub use schema::{FieldKeysConfig, LoggerConfig};
