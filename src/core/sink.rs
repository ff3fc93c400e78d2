//! Sink trait for log output destinations

use super::error::LoggerError;
use parking_lot::{Mutex, RwLock};
use std::io;
use std::sync::Arc;

/// A byte destination for rendered log lines.
///
/// `write` receives one complete line (header, message and newline) per call.
/// A failed write is not fatal to the logger: it is remembered and reported by
/// the next `sync()`, and later records are still attempted.
pub trait Sink: Send {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Whether output lands on an interactive terminal. Used for auto color.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// A failed sink write, cheap to clone so one failure can answer several syncs
#[derive(Debug, Clone)]
pub(crate) struct WriteFailure {
    pub(crate) sink: String,
    pub(crate) source: Arc<io::Error>,
}

impl From<WriteFailure> for LoggerError {
    fn from(failure: WriteFailure) -> Self {
        LoggerError::sink_write(failure.sink, failure.source)
    }
}

type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

/// The installed sink, with the properties read without touching it
struct Installed {
    sink: SharedSink,
    name: String,
    terminal: bool,
}

impl Installed {
    fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            name: sink.name().to_string(),
            terminal: sink.is_terminal(),
            sink: Arc::new(Mutex::new(sink)),
        }
    }
}

/// The sink shared by a root logger and every logger derived from it.
///
/// Swapping the installed sink redirects all of them, including records that
/// are already queued. A write holds only the sink it started on, so a sink
/// whose write hangs can still be replaced.
pub(crate) struct SinkSlot {
    installed: RwLock<Installed>,
}

impl SinkSlot {
    pub(crate) fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            installed: RwLock::new(Installed::new(sink)),
        }
    }

    fn current(&self) -> (SharedSink, String) {
        let installed = self.installed.read();
        (Arc::clone(&installed.sink), installed.name.clone())
    }

    pub(crate) fn write(&self, buf: &[u8]) -> Result<(), WriteFailure> {
        let (sink, name) = self.current();
        let result = sink.lock().write(buf);
        result.map_err(|e| WriteFailure {
            sink: name,
            source: Arc::new(e),
        })
    }

    pub(crate) fn flush(&self) -> io::Result<()> {
        let (sink, _) = self.current();
        let result = sink.lock().flush();
        result
    }

    /// Install `sink`. Returns the previous sink, or `None` while a write to
    /// it is still in progress; it is dropped once that write ends.
    pub(crate) fn replace(&self, sink: Box<dyn Sink>) -> Option<Box<dyn Sink>> {
        let previous = std::mem::replace(&mut *self.installed.write(), Installed::new(sink));
        Arc::try_unwrap(previous.sink).ok().map(Mutex::into_inner)
    }

    pub(crate) fn name(&self) -> String {
        self.installed.read().name.clone()
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.installed.read().terminal
    }
}
