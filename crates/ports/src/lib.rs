//! # unilog-ports
//!
//! The boundary contract between callers and logging adapters. Callers hold a
//! reference typed only as [`LogPort`] and never see which engine performs
//! the emission.
//!
//! This crate depends only on `unilog-domain`.

pub mod errors;
pub mod logger;

pub use errors::{ConstructError, EmitError};
pub use logger::LogPort;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `unilog-domain`.
pub use unilog_domain::{ContextMap, Destination, Encoding, FieldKeys, Level, merge_context};
