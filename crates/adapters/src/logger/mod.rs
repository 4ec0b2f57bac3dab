//! Logger adapters and their shared destination plumbing.

pub mod env;
pub mod slog;

use std::fs::OpenOptions;
use std::io::{self, Write};
use unilog_ports::{ConstructError, Destination};

/// Open one destination as a boxed writer.
///
/// Console maps to stdout; files are created if absent and appended to
/// otherwise. A failed open is a construction failure surfaced to the
/// caller.
pub(crate) fn destination_writer(
    destination: &Destination,
) -> Result<Box<dyn Write + Send>, ConstructError> {
    match destination {
        Destination::Console => Ok(Box::new(io::stdout())),
        Destination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ConstructError::Destination {
                    path: path.clone(),
                    source,
                })?;
            Ok(Box::new(file))
        },
    }
}

/// Resolve the effective destination list: an empty sequence means console.
pub(crate) fn effective_destinations(destinations: &[Destination]) -> Vec<Destination> {
    if destinations.is_empty() {
        vec![Destination::Console]
    } else {
        destinations.to_vec()
    }
}

/// Writer that fans a record out to several destinations in order.
pub(crate) struct TeeWriter {
    writers: Vec<Box<dyn Write + Send>>,
}

impl TeeWriter {
    pub(crate) fn new(writers: Vec<Box<dyn Write + Send>>) -> Self {
        Self { writers }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for writer in &mut self.writers {
            writer.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for writer in &mut self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}
