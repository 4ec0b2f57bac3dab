//! Canonical severity taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical log severity, ordered from least to most severe.
///
/// The set is fixed at process start and shared by every adapter; each
/// adapter owns the mapping from these names to its engine's native
/// severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest-grained diagnostics.
    Trace,
    /// Developer diagnostics.
    Debug,
    /// Normal operational events.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures the caller should look at.
    Error,
    /// Unrecoverable failure; the process exits after the record is written.
    Fatal,
    /// Unrecoverable failure; the call panics after the record is written.
    Panic,
}

impl Level {
    /// Parse a canonical level name. Comparison is case-sensitive: `"INFO"`
    /// is not a canonical name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            "panic" => Some(Self::Panic),
            _ => None,
        }
    }

    /// Resolve a level name on the emit path.
    ///
    /// Unrecognized names resolve to [`Level::Error`] instead of failing, so
    /// a malformed level never prevents the message from being recorded.
    #[must_use]
    pub fn parse_or_fallback(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Error)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Ordinal rank used for minimum-level comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Trace => 10,
            Self::Debug => 20,
            Self::Info => 30,
            Self::Warn => 40,
            Self::Error => 50,
            Self::Fatal => 60,
            Self::Panic => 70,
        }
    }

    /// True for severities whose emission ends the process.
    #[must_use]
    pub const fn is_terminating(self) -> bool {
        matches!(self, Self::Fatal | Self::Panic)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
