//! Construction-time value objects: destinations, encodings, field keys.

use std::path::PathBuf;

/// Reserved destination tokens that mean "write to the console".
const CONSOLE_TOKENS: [&str; 2] = ["console", "stdout"];

/// Where an adapter writes its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output.
    Console,
    /// A file, created if absent and appended to otherwise.
    File(PathBuf),
}

impl Destination {
    /// Parse a destination descriptor. Empty strings and the reserved console
    /// tokens mean standard output; anything else is a file path.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let trimmed = descriptor.trim();
        if trimmed.is_empty() || CONSOLE_TOKENS.contains(&trimmed) {
            Self::Console
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::Console
    }
}

/// Output encoding for a record line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// One machine-readable JSON record per line.
    #[default]
    Structured,
    /// One human-readable line per record.
    Text,
}

impl Encoding {
    /// Parse an encoding name, accepting the usual synonyms.
    ///
    /// `"json"` and `"structured"` select structured mode; `"txt"`, `"text"`,
    /// `"plain"`, and `"console"` select text mode. Anything else, including
    /// the empty string, falls back to the structured default.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "txt" | "text" | "plain" | "console" => Self::Text,
            _ => Self::Structured,
        }
    }
}

/// Record-key remapping for the reserved timestamp/level/message keys.
///
/// Defaults follow the Elastic-friendly key set (`@timestamp`, `level`,
/// `msg`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKeys {
    /// Key under which the record timestamp is written.
    pub timestamp: Box<str>,
    /// Key under which the mapped severity is written.
    pub level: Box<str>,
    /// Key under which the message is written.
    pub message: Box<str>,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            timestamp: "@timestamp".into(),
            level: "level".into(),
            message: "msg".into(),
        }
    }
}
