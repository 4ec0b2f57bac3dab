//! Structured logging boundary contract.

use crate::errors::EmitError;
use unilog_domain::ContextMap;

/// Capability contract for emitting one structured log record.
///
/// A `LogPort` reference is a non-owning view over exactly one adapter
/// instance; the component that constructed the adapter owns its lifetime
/// (including any flush/close before process exit).
pub trait LogPort: Send + Sync {
    /// Record one log entry at the severity mapped from `level`.
    ///
    /// `level` should be one of the canonical names (`trace`, `debug`,
    /// `info`, `warn`, `error`, `fatal`, `panic`) but is accepted even when
    /// it is not: unrecognized names resolve to the `error` severity so the
    /// message is never dropped. `message` may be any string, including the
    /// empty one. `context` is an ordered sequence of optional maps merged
    /// with later-wins semantics; `None` entries are normal input.
    ///
    /// Every call that reaches an adapter results in exactly one attempt to
    /// record one entry. Whether the entry becomes visible is subject to the
    /// engine's own minimum-level filtering, configured at construction.
    ///
    /// Emitting at `fatal` exits the process and emitting at `panic` panics,
    /// in both cases after the record has been handed to the engine. Callers
    /// relying on startup-failure semantics may count on this.
    ///
    /// The method is `#[track_caller]` so adapters can attach the call site
    /// to the record.
    #[track_caller]
    fn emit(
        &self,
        level: &str,
        message: &str,
        context: &[Option<ContextMap>],
    ) -> Result<(), EmitError>;
}
