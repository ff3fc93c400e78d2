//! Log record: one rendered message on its way to the sink

use super::header;
use super::log_level::LogLevel;
use super::logger::LoggerShared;
use super::sink::WriteFailure;
use chrono::{DateTime, Utc};
use colored::Color;
use std::sync::Arc;

/// What kind of line a record produces.
///
/// Ordinary records carry the severity they were logged at. Timing records
/// come from [`Timer`](super::timer::Timer) and sit outside the gating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Level(LogLevel),
    Timing,
}

impl Tag {
    pub(crate) const TIMING_INDEX: u32 = 5;

    /// Text used inside the bracketed header tag
    pub fn label(&self) -> &'static str {
        match self {
            Tag::Level(level) => level.to_str(),
            Tag::Timing => "time",
        }
    }

    /// Tag color; `None` keeps the terminal's default foreground
    pub fn color_code(&self) -> Option<Color> {
        match self {
            Tag::Level(level) => level.color_code(),
            Tag::Timing => Some(Color::Cyan),
        }
    }

    #[inline]
    pub(crate) fn index(self) -> u32 {
        match self {
            Tag::Level(level) => level.index(),
            Tag::Timing => Self::TIMING_INDEX,
        }
    }
}

impl From<LogLevel> for Tag {
    fn from(level: LogLevel) -> Self {
        Tag::Level(level)
    }
}

/// A single log event.
///
/// The message is fully rendered when the record is built. The owner is kept
/// by reference so the header reflects the owning logger's prefix and features
/// at the moment the record is written, and so the record goes to the sink
/// that is current at that moment.
pub(crate) struct Record {
    pub(crate) tag: Tag,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) message: Vec<u8>,
    pub(crate) owner: Arc<LoggerShared>,
}

impl Record {
    pub(crate) fn new(
        tag: Tag,
        timestamp: DateTime<Utc>,
        message: Vec<u8>,
        owner: Arc<LoggerShared>,
    ) -> Self {
        Self {
            tag,
            timestamp,
            message,
            owner,
        }
    }

    /// Header, message and exactly one trailing newline, appended to `out`.
    pub(crate) fn render(&self, out: &mut Vec<u8>) {
        {
            let settings = self.owner.settings.read();
            header::format_header(
                out,
                &self.timestamp,
                settings.features,
                self.tag,
                &settings.prefix,
            );
        }
        out.extend_from_slice(&self.message);
        if self.message.last() != Some(&b'\n') {
            out.push(b'\n');
        }
    }

    /// Render into `out` (cleared first) and hand the bytes to the owner's sink.
    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<(), WriteFailure> {
        out.clear();
        self.render(out);
        self.owner.sink.write(out)
    }

    /// Give back the message buffer for reuse
    pub(crate) fn into_message(self) -> Vec<u8> {
        self.message
    }
}
