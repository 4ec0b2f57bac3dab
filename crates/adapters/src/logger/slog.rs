//! Adapter for the `slog` engine.
//!
//! Owns a fully configured `slog` pipeline: one drain per destination
//! (`slog-json` for structured output with remapped keys, `slog-term` for
//! text), fanned out with [`slog::Duplicate`], filtered at the configured
//! minimum level, and buffered through [`slog_async::Async`]. Because the
//! async drain buffers records on a worker thread, [`SlogLogger::close`] must
//! run before process exit to guarantee no buffered entries are lost.

use crate::logger::{destination_writer, effective_destinations};
use slog::Drain;
use std::panic::Location;
use std::process;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use unilog_ports::{
    ConstructError, ContextMap, Destination, EmitError, Encoding, FieldKeys, Level, LogPort,
    merge_context,
};

type BoxedDrain = Box<dyn Drain<Ok = (), Err = slog::Never> + Send + 'static>;

/// Construction options for [`SlogLogger`].
#[derive(Debug, Clone)]
pub struct SlogOptions {
    /// Minimum canonical level name. Empty or unparseable names default to
    /// `info`; the unparseable case emits a warning through the new logger.
    pub min_level: Box<str>,
    /// Output destinations, in order. Empty means console.
    pub destinations: Vec<Destination>,
    /// Record encoding.
    pub encoding: Encoding,
    /// Key remapping for the reserved timestamp/level/message keys.
    pub field_keys: FieldKeys,
}

impl Default for SlogOptions {
    fn default() -> Self {
        Self {
            min_level: "info".into(),
            destinations: Vec::new(),
            encoding: Encoding::Structured,
            field_keys: FieldKeys::default(),
        }
    }
}

/// [`LogPort`] adapter over an owned `slog` engine instance.
pub struct SlogLogger {
    // `close` drops the logger (and with it the async drain, which flushes
    // its worker); emits take the read side.
    engine: RwLock<Option<slog::Logger>>,
    min_level: Level,
}

impl SlogLogger {
    /// Build a configured `slog` pipeline and return a ready adapter.
    ///
    /// Fails fast when a file destination cannot be opened; no partial
    /// instance is returned.
    pub fn new(options: SlogOptions) -> Result<Self, ConstructError> {
        let parsed = Level::parse(&options.min_level);
        let min_level = parsed.unwrap_or(Level::Info);

        let destinations = effective_destinations(&options.destinations);
        let mut drains = Vec::with_capacity(destinations.len());
        for destination in &destinations {
            let writer = destination_writer(destination)?;
            drains.push(build_drain(writer, options.encoding, &options.field_keys));
        }
        let combined = combine_drains(drains);

        // Filter before the channel so suppressed records never reach the
        // worker thread.
        let filtered = combined.filter_level(native_level(min_level)).ignore_res();
        let buffered = slog_async::Async::new(filtered).build().ignore_res();
        let logger = slog::Logger::root(buffered, slog::o!());

        if parsed.is_none() && !options.min_level.trim().is_empty() {
            let mut notice = ContextMap::new();
            notice.insert(
                "given".into(),
                serde_json::Value::String(options.min_level.to_string()),
            );
            write_record(
                &logger,
                Level::Warn,
                "unrecognized minimum level, defaulting to info",
                &notice,
                Location::caller(),
            );
        }

        Ok(Self {
            engine: RwLock::new(Some(logger)),
            min_level,
        })
    }

    /// Effective minimum level resolved at construction.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Release the engine, flushing the buffered drain.
    ///
    /// Must run before process exit for buffered entries to be durable.
    /// Idempotent; emits after `close` fail with [`EmitError::Closed`].
    pub fn close(&self) {
        let mut guard = self
            .engine
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Dropping the last logger handle joins the async worker.
        guard.take();
    }
}

impl LogPort for SlogLogger {
    #[track_caller]
    fn emit(
        &self,
        level: &str,
        message: &str,
        context: &[Option<ContextMap>],
    ) -> Result<(), EmitError> {
        let caller = Location::caller();
        let canonical = Level::parse_or_fallback(level);
        let fields = merge_context(context);

        {
            let guard = self.engine.read().unwrap_or_else(PoisonError::into_inner);
            let Some(logger) = guard.as_ref() else {
                return Err(EmitError::Closed);
            };
            write_record(logger, canonical, message, &fields, caller);
        }

        match canonical {
            Level::Fatal => {
                self.close();
                process::exit(1);
            },
            Level::Panic => {
                self.close();
                panic!("{message}");
            },
            _ => Ok(()),
        }
    }
}

/// Hand one record to the engine at the mapped native severity.
fn write_record(
    logger: &slog::Logger,
    level: Level,
    message: &str,
    fields: &ContextMap,
    caller: &'static Location<'static>,
) {
    let location = slog::RecordLocation {
        file: caller.file(),
        line: caller.line(),
        column: caller.column(),
        function: "",
        module: "",
    };
    let record_static = slog::RecordStatic {
        location: &location,
        level: native_level(level),
        tag: "",
    };
    let kv = ContextValues(fields);
    logger.log(&slog::Record::new(
        &record_static,
        &format_args!("{message}"),
        slog::BorrowedKV(&kv),
    ));
}

/// Canonical-to-native severity mapping for `slog`.
const fn native_level(level: Level) -> slog::Level {
    match level {
        Level::Trace => slog::Level::Trace,
        Level::Debug => slog::Level::Debug,
        Level::Info => slog::Level::Info,
        Level::Warn => slog::Level::Warning,
        Level::Error => slog::Level::Error,
        Level::Fatal | Level::Panic => slog::Level::Critical,
    }
}

/// Lowercase severity names written under the configured level key.
const fn severity_name(level: slog::Level) -> &'static str {
    match level {
        slog::Level::Critical => "critical",
        slog::Level::Error => "error",
        slog::Level::Warning => "warning",
        slog::Level::Info => "info",
        slog::Level::Debug => "debug",
        slog::Level::Trace => "trace",
    }
}

fn build_drain(
    writer: Box<dyn std::io::Write + Send>,
    encoding: Encoding,
    keys: &FieldKeys,
) -> BoxedDrain {
    match encoding {
        Encoding::Structured => {
            let drain = slog_json::Json::new(writer)
                .add_key_value(slog::o!(
                    keys.timestamp.to_string() => slog::PushFnValue(|_record, serializer| {
                        serializer.emit(
                            humantime::format_rfc3339_millis(SystemTime::now()).to_string(),
                        )
                    }),
                    keys.level.to_string() => slog::FnValue(|record| {
                        severity_name(record.level())
                    }),
                    keys.message.to_string() => slog::PushFnValue(|record, serializer| {
                        serializer.emit(record.msg())
                    }),
                    "caller".to_string() => slog::FnValue(|record| {
                        format!("{}:{}", record.location().file, record.location().line)
                    }),
                ))
                .build();
            Box::new(drain.ignore_res())
        },
        Encoding::Text => {
            let decorator = slog_term::PlainSyncDecorator::new(writer);
            let drain = slog_term::FullFormat::new(decorator).build();
            Box::new(drain.ignore_res())
        },
    }
}

/// Fan records out to every destination drain in order.
fn combine_drains(drains: Vec<BoxedDrain>) -> BoxedDrain {
    let mut iterator = drains.into_iter();
    let Some(first) = iterator.next() else {
        // Unreachable in practice: destinations default to console.
        return Box::new(slog::Discard.ignore_res());
    };
    iterator.fold(first, |combined, next| {
        Box::new(slog::Duplicate::new(combined, next).ignore_res())
    })
}

/// Merged context exposed through `slog`'s key/value mechanism.
struct ContextValues<'a>(&'a ContextMap);

impl slog::KV for ContextValues<'_> {
    fn serialize(
        &self,
        _record: &slog::Record<'_>,
        serializer: &mut dyn slog::Serializer,
    ) -> slog::Result {
        for (key, value) in self.0 {
            let key = slog::Key::from(key.to_string());
            match value {
                serde_json::Value::Null => serializer.emit_unit(key)?,
                serde_json::Value::Bool(flag) => serializer.emit_bool(key, *flag)?,
                serde_json::Value::Number(number) => {
                    if let Some(signed) = number.as_i64() {
                        serializer.emit_i64(key, signed)?;
                    } else if let Some(unsigned) = number.as_u64() {
                        serializer.emit_u64(key, unsigned)?;
                    } else {
                        serializer.emit_f64(key, number.as_f64().unwrap_or_default())?;
                    }
                },
                serde_json::Value::String(text) => serializer.emit_str(key, text)?,
                // Nested shapes render as compact JSON text.
                nested => serializer.emit_str(key, &nested.to_string())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use unilog_domain::context;

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    fn file_logger(path: &Path, min_level: &str, encoding: Encoding) -> SlogLogger {
        match SlogLogger::new(SlogOptions {
            min_level: min_level.into(),
            destinations: vec![Destination::File(path.to_path_buf())],
            encoding,
            field_keys: FieldKeys::default(),
        }) {
            Ok(logger) => logger,
            Err(error) => panic!("construction failed: {error}"),
        }
    }

    #[test]
    fn structured_record_carries_message_fields_and_caller() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "info", Encoding::Structured);

        logger.emit("info", "hello", &[Some(context! { "a" => "1" })])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        let payload: serde_json::Value = match serde_json::from_str(&lines[0]) {
            Ok(value) => value,
            Err(error) => panic!("not json: {error}"),
        };
        assert_eq!(payload.get("msg").and_then(|v| v.as_str()), Some("hello"));
        assert_eq!(payload.get("level").and_then(|v| v.as_str()), Some("info"));
        assert_eq!(payload.get("a").and_then(|v| v.as_str()), Some("1"));
        assert!(payload.get("@timestamp").is_some());
        let caller = payload.get("caller").and_then(|v| v.as_str()).unwrap_or("");
        assert!(caller.contains("slog.rs"), "unexpected caller: {caller}");
        Ok(())
    }

    #[test]
    fn later_context_maps_override_earlier_ones() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "info", Encoding::Structured);

        logger.emit(
            "error",
            "boom",
            &[Some(context! { "x" => "1" }), Some(context! { "x" => "2" })],
        )?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("boom"));
        assert!(lines[0].contains("\"x\":\"2\""));
        assert!(!lines[0].contains("\"x\":\"1\""));
        Ok(())
    }

    #[test]
    fn records_below_minimum_level_are_invisible() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "warn", Encoding::Structured);

        logger.emit("info", "filtered", &[])?;
        logger.emit("trace", "also filtered", &[])?;
        logger.emit("warn", "visible", &[])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("visible"));
        Ok(())
    }

    #[test]
    fn unrecognized_emit_level_is_recorded_at_error() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "error", Encoding::Structured);

        logger.emit("bogus", "never dropped", &[])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("never dropped"));
        assert!(lines[0].contains("\"level\":\"error\""));
        Ok(())
    }

    #[test]
    fn bogus_minimum_level_defaults_to_info_with_a_notice() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "bogus", Encoding::Structured);
        assert_eq!(logger.min_level(), Level::Info);

        logger.emit("debug", "filtered at default", &[])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("defaulting to info"));
        assert!(lines[0].contains("bogus"));
        Ok(())
    }

    #[test]
    fn missing_destination_directory_fails_construction() {
        let result = SlogLogger::new(SlogOptions {
            min_level: "info".into(),
            destinations: vec![Destination::File(
                Path::new("/definitely/not/a/directory/out.log").to_path_buf(),
            )],
            encoding: Encoding::Structured,
            field_keys: FieldKeys::default(),
        });
        assert!(matches!(
            result,
            Err(ConstructError::Destination { .. })
        ));
    }

    #[test]
    fn emit_after_close_is_refused() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("tempdir: {error}"),
        };
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "info", Encoding::Structured);
        logger.close();
        logger.close(); // idempotent

        let result = logger.emit("info", "late", &[]);
        assert!(matches!(result, Err(EmitError::Closed)));
    }

    #[test]
    fn identical_emits_produce_two_identically_shaped_entries() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "info", Encoding::Structured);

        logger.emit("info", "again", &[Some(context! { "n" => 1 })])?;
        logger.emit("info", "again", &[Some(context! { "n" => 1 })])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.contains("again"));
            assert!(line.contains("\"n\":1"));
        }
        Ok(())
    }

    #[test]
    fn text_encoding_writes_human_readable_lines() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let path = dir.path().join("out.log");
        let logger = file_logger(&path, "info", Encoding::Text);

        logger.emit("info", "hello", &[Some(context! { "a" => "1" })])?;
        logger.close();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("hello"));
        assert!(lines[0].contains('a'));
        assert!(lines[0].contains('1'));
        // Not JSON.
        assert!(serde_json::from_str::<serde_json::Value>(&lines[0]).is_err());
        Ok(())
    }

    #[test]
    fn multiple_destinations_each_receive_the_record() -> Result<(), EmitError> {
        let dir = tempfile::tempdir().map_err(|_| EmitError::Closed)?;
        let first = dir.path().join("a.log");
        let second = dir.path().join("b.log");
        let logger = match SlogLogger::new(SlogOptions {
            min_level: "info".into(),
            destinations: vec![
                Destination::File(first.clone()),
                Destination::File(second.clone()),
            ],
            encoding: Encoding::Structured,
            field_keys: FieldKeys::default(),
        }) {
            Ok(logger) => logger,
            Err(error) => panic!("construction failed: {error}"),
        };

        logger.emit("info", "both", &[])?;
        logger.close();

        assert_eq!(read_lines(&first).len(), 1);
        assert_eq!(read_lines(&second).len(), 1);
        Ok(())
    }
}
