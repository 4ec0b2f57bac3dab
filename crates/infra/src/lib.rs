//! # unilog-infra
//!
//! Composition root: resolves a backend name to a concrete adapter and hands
//! the caller a closeable handle plus the port view of it.

mod factory;

pub use factory::{BackendKind, LoggerHandle, build_logger, parse_backend};
