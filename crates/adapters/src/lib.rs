//! # unilog-adapters
//!
//! Adapter implementations binding the [`unilog_ports::LogPort`] contract to
//! concrete logging engines. Each adapter owns one configured engine
//! instance, maps the canonical level taxonomy onto the engine's native
//! severities, and attaches merged context through the engine's native field
//! mechanism.

pub mod logger;

pub use logger::env::{EnvLogger, EnvOptions};
pub use logger::slog::{SlogLogger, SlogOptions};
