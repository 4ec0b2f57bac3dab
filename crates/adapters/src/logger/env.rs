//! Adapter for the `log` facade driven through an owned `env_logger` engine.
//!
//! The engine is built as a non-global instance (`env_logger::Builder::build`)
//! and driven directly via [`log::Log`], so multiple adapters in one process
//! never interfere through global logger state. Structured fields ride on
//! `log::kv` key/values; a custom format closure renders them under the
//! configured field keys. The engine writes each record through immediately,
//! so [`EnvLogger::close`] only forwards a flush and is optional.

use crate::logger::{TeeWriter, destination_writer, effective_destinations};
use log::Log;
use std::io::{self, Write};
use std::panic::Location;
use std::process;
use unilog_ports::{
    ConstructError, ContextMap, Destination, EmitError, Encoding, FieldKeys, Level, LogPort,
    merge_context,
};

/// Construction options for [`EnvLogger`].
#[derive(Debug, Clone)]
pub struct EnvOptions {
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

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            min_level: "info".into(),
            destinations: Vec::new(),
            encoding: Encoding::Structured,
            field_keys: FieldKeys::default(),
        }
    }
}

/// [`LogPort`] adapter over an owned `env_logger` engine instance.
pub struct EnvLogger {
    engine: env_logger::Logger,
    min_level: Level,
}

impl EnvLogger {
    /// Build a configured `env_logger` instance and return a ready adapter.
    ///
    /// Fails fast when a file destination cannot be opened; no partial
    /// instance is returned.
    pub fn new(options: EnvOptions) -> Result<Self, ConstructError> {
        let parsed = Level::parse(&options.min_level);
        let min_level = parsed.unwrap_or(Level::Info);

        let destinations = effective_destinations(&options.destinations);
        let mut writers = Vec::with_capacity(destinations.len());
        for destination in &destinations {
            writers.push(destination_writer(destination)?);
        }
        let target: Box<dyn Write + Send> = if writers.len() == 1 {
            writers.remove(0)
        } else {
            Box::new(TeeWriter::new(writers))
        };

        let mut builder = env_logger::Builder::new();
        builder.filter_level(native_filter(min_level));
        builder.target(env_logger::Target::Pipe(target));
        match options.encoding {
            Encoding::Structured => builder.format(structured_format(options.field_keys)),
            // The reserved keys only rename JSON record keys; the text layout
            // is positional, like the engines' own console formats.
            Encoding::Text => builder.format(text_format()),
        };
        let engine = builder.build();

        let adapter = Self { engine, min_level };
        if parsed.is_none() && !options.min_level.trim().is_empty() {
            let mut notice = ContextMap::new();
            notice.insert(
                "given".into(),
                serde_json::Value::String(options.min_level.to_string()),
            );
            adapter.write_record(
                Level::Warn,
                "unrecognized minimum level, defaulting to info",
                &notice,
                Location::caller(),
            );
        }
        Ok(adapter)
    }

    /// Effective minimum level resolved at construction.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Flush the engine. The engine does not buffer across records, so this
    /// is optional; it exists for symmetry with buffering backends.
    pub fn close(&self) {
        self.engine.flush();
    }

    fn write_record(
        &self,
        level: Level,
        message: &str,
        fields: &ContextMap,
        caller: &'static Location<'static>,
    ) {
        let source = ContextSource(fields);
        self.engine.log(
            &log::Record::builder()
                .level(native_level(level))
                .target("unilog")
                .args(format_args!("{message}"))
                .file(Some(caller.file()))
                .line(Some(caller.line()))
                .key_values(&source)
                .build(),
        );
    }
}

impl LogPort for EnvLogger {
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
        self.write_record(canonical, message, &fields, caller);

        match canonical {
            Level::Fatal => {
                self.engine.flush();
                process::exit(1);
            },
            Level::Panic => {
                self.engine.flush();
                panic!("{message}");
            },
            // The `log` facade has no error channel on writes; a record that
            // reached the engine counts as recorded.
            _ => Ok(()),
        }
    }
}

/// Canonical-to-native severity mapping for the five-level `log` facade.
const fn native_level(level: Level) -> log::Level {
    match level {
        Level::Trace => log::Level::Trace,
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warn => log::Level::Warn,
        Level::Error | Level::Fatal | Level::Panic => log::Level::Error,
    }
}

const fn native_filter(level: Level) -> log::LevelFilter {
    match level {
        Level::Trace => log::LevelFilter::Trace,
        Level::Debug => log::LevelFilter::Debug,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error | Level::Fatal | Level::Panic => log::LevelFilter::Error,
    }
}

type FormatFn =
    dyn Fn(&mut env_logger::fmt::Formatter, &log::Record<'_>) -> io::Result<()> + Send + Sync;

fn structured_format(keys: FieldKeys) -> Box<FormatFn> {
    Box::new(move |buf, record| {
        let mut payload = serde_json::Map::new();
        payload.insert(
            keys.timestamp.to_string(),
            serde_json::Value::String(buf.timestamp_millis().to_string()),
        );
        payload.insert(
            keys.level.to_string(),
            serde_json::Value::String(record.level().to_string().to_ascii_lowercase()),
        );
        payload.insert(
            keys.message.to_string(),
            serde_json::Value::String(record.args().to_string()),
        );
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            payload.insert(
                "caller".to_string(),
                serde_json::Value::String(format!("{file}:{line}")),
            );
        }

        let mut visitor = JsonFieldVisitor(&mut payload);
        record
            .key_values()
            .visit(&mut visitor)
            .map_err(|error| io::Error::other(error.to_string()))?;

        writeln!(buf, "{}", serde_json::Value::Object(payload))
    })
}

fn text_format() -> Box<FormatFn> {
    Box::new(move |buf, record| {
        let mut fields = Vec::new();
        let mut visitor = TextFieldVisitor(&mut fields);
        record
            .key_values()
            .visit(&mut visitor)
            .map_err(|error| io::Error::other(error.to_string()))?;

        write!(
            buf,
            "{} {} {}",
            buf.timestamp_millis(),
            record.level(),
            record.args()
        )?;
        for (key, value) in fields {
            write!(buf, " {key}={value}")?;
        }
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            write!(buf, " caller={file}:{line}")?;
        }
        writeln!(buf)
    })
}

/// Merged context exposed through the `log::kv` source mechanism.
struct ContextSource<'a>(&'a ContextMap);

impl log::kv::Source for ContextSource<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        for (key, value) in self.0 {
            visitor.visit_pair(log::kv::Key::from_str(key), log::kv::Value::from_serde(value))?;
        }
        Ok(())
    }
}

struct JsonFieldVisitor<'a>(&'a mut serde_json::Map<String, serde_json::Value>);

impl<'kvs> log::kv::VisitSource<'kvs> for JsonFieldVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        let encoded = serde_json::to_value(&value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        self.0.insert(key.to_string(), encoded);
        Ok(())
    }
}

struct TextFieldVisitor<'a>(&'a mut Vec<(String, String)>);

impl<'kvs> log::kv::VisitSource<'kvs> for TextFieldVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        // `Display` on a captured value quotes strings; render them bare.
        let rendered = match serde_json::to_value(&value) {
            Ok(serde_json::Value::String(text)) => text,
            _ => value.to_string(),
        };
        self.0.push((key.to_string(), rendered));
        Ok(())
    }
}
