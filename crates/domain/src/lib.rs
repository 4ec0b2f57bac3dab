//! # unilog-domain
//!
//! Value types for the unilog workspace: the canonical level taxonomy, the
//! context-map merge semantics, and the construction-time value objects
//! (destinations, encodings, field-key remapping).
//!
//! This crate sits at the bottom of the hexagonal layering and only depends
//! on `serde`/`serde_json`.

pub mod context;
pub mod level;
pub mod output;

pub use context::{ContextMap, merge_context};
pub use level::Level;
pub use output::{Destination, Encoding, FieldKeys};

// Re-exported for the `context!` macro expansion.
#[doc(hidden)]
pub use serde_json;
