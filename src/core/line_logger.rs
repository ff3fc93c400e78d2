//! Line-oriented adapter for code that expects a plain "print a line" logger

use super::log_level::LogLevel;
use super::logger::LoggerShared;
use super::record::Tag;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Writes whole lines at one fixed level through a [`Logger`](super::logger::Logger).
///
/// Whether it writes at all is decided once, when it is created: if its level
/// was below the logger's threshold then, everything is discarded. Bytes
/// written through [`io::Write`] are split on `\n`; each complete line becomes
/// one record, and a trailing partial line is emitted on `flush` or drop.
///
/// ```
/// use rust_queue_logger::prelude::*;
/// use std::io::Write;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(sink.clone(), "", LogLevel::Warn, Features::PREFIX);
///
/// let mut warn = logger.line_logger(LogLevel::Warn);
/// let mut info = logger.line_logger(LogLevel::Info);
/// writeln!(warn, "oh no").unwrap();
/// writeln!(info, "hello").unwrap();
/// logger.sync().unwrap();
///
/// assert_eq!(sink.contents(), "[warn] oh no\n");
/// ```
pub struct LineLogger {
    owner: Arc<LoggerShared>,
    level: LogLevel,
    enabled: bool,
    partial: Vec<u8>,
}

impl LineLogger {
    pub(crate) fn new(owner: Arc<LoggerShared>, level: LogLevel, enabled: bool) -> Self {
        Self {
            owner,
            level,
            enabled,
            partial: Vec::new(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether lines written here reach the logger
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log one formatted line
    pub fn print(&self, message: impl fmt::Display) {
        if self.enabled {
            self.owner.submit(Tag::Level(self.level), message);
        }
    }

    fn emit_partial(&mut self) {
        if self.partial.is_empty() {
            return;
        }
        let line = std::mem::take(&mut self.partial);
        self.print(String::from_utf8_lossy(&line));
    }
}

impl io::Write for LineLogger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.enabled {
            return Ok(buf.len());
        }
        let mut rest = buf;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.partial.extend_from_slice(&rest[..pos]);
            let line = std::mem::take(&mut self.partial);
            self.print(String::from_utf8_lossy(&line));
            rest = &rest[pos + 1..];
        }
        self.partial.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit_partial();
        Ok(())
    }
}

impl Drop for LineLogger {
    fn drop(&mut self) {
        self.emit_partial();
    }
}
