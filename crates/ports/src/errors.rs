//! Error taxonomy for construction and emission.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Emission was refused by the adapter or its engine.
///
/// The contract layer never rejects on level or shape grounds; an emit error
/// means the backend could not accept the write.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The adapter was closed and its engine released.
    #[error("logger is closed")]
    Closed,
}

/// Construction failed; no partial adapter instance is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// A file destination could not be opened or created.
    #[error("cannot open log destination {path}: {source}")]
    Destination {
        /// Path of the destination that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The requested backend name is not one of the supported engines.
    #[error("unsupported logging backend: {name}")]
    UnknownBackend {
        /// The backend name as given.
        name: String,
    },
}
