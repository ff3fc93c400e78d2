//! Sinks over arbitrary writers

use crate::core::Sink;
use std::io::{self, Write};

/// Adapts any [`io::Write`] into a sink.
///
/// ```
/// use rust_queue_logger::prelude::*;
///
/// let logger = Logger::new(WriterSink::new(Vec::new()), "", LogLevel::Info, Features::empty());
/// logger.info("into a Vec");
/// logger.sync().unwrap();
/// ```
pub struct WriterSink<W> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_passes_bytes_through() {
        let mut sink = WriterSink::named(Vec::new(), "vec");
        sink.write(b"abc\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.name(), "vec");
        assert_eq!(sink.into_inner(), b"abc\n");
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        assert!(sink.write(b"gone\n").is_ok());
        assert_eq!(sink.name(), "null");
    }
}
