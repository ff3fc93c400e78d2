//! Header rendering
//!
//! Every written line starts with a header assembled from the record's
//! timestamp and tag and from the owning logger's features and prefix, in
//! this order:
//!
//! 1. date `YYYY-MM-DD` and/or time `HH:MM:SS[.sss|.ssssss]`, muted when colored
//! 2. the bracketed tag (`[info] `), if enabled for that tag
//! 3. the logger prefix followed by one space, if non-empty

use super::features::Features;
use super::record::Tag;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use colored::Color;
use std::borrow::Cow;
use std::io::Write;

const BOLD: &str = "1";
const BOLD_OFF: &str = "22";
const FG_DEFAULT: &str = "39";
pub(crate) const FG_RESET: &str = "\x1b[39m";

fn sgr(buf: &mut Vec<u8>, codes: &[&str]) {
    buf.extend_from_slice(b"\x1b[");
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            buf.push(b';');
        }
        buf.extend_from_slice(code.as_bytes());
    }
    buf.push(b'm');
}

/// Escape sequence for the muted tone used for timestamps and origins
pub(crate) fn muted() -> String {
    format!("\x1b[{}m", Color::BrightBlack.to_fg_str())
}

pub(crate) fn push_muted(buf: &mut Vec<u8>) {
    buf.extend_from_slice(muted().as_bytes());
}

/// Restore the default foreground color
pub(crate) fn push_reset(buf: &mut Vec<u8>) {
    buf.extend_from_slice(FG_RESET.as_bytes());
}

/// Append the header for one record to `buf`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_queue_logger::{format_header, Features, LogLevel, Tag};
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// let mut buf = Vec::new();
/// format_header(
///     &mut buf,
///     &ts,
///     Features::DATE | Features::TIME | Features::UTC | Features::PREFIX,
///     Tag::Level(LogLevel::Warn),
///     "[db]",
/// );
/// assert_eq!(buf, b"2025-01-08 10:30:45 [warn] [db] ");
/// ```
pub fn format_header(
    buf: &mut Vec<u8>,
    timestamp: &DateTime<Utc>,
    features: Features,
    tag: Tag,
    prefix: &str,
) {
    let color = features.contains(Features::COLOR);

    if features.has_timestamp() {
        if color {
            push_muted(buf);
        }
        if features.contains(Features::UTC) {
            push_timestamp(buf, timestamp, features);
        } else {
            push_timestamp(buf, &timestamp.with_timezone(&Local), features);
        }
        if color {
            push_reset(buf);
        }
    }

    if features.contains(Features::prefix_for(tag)) {
        if color {
            push_muted(buf);
            buf.push(b'[');
            let fg = tag
                .color_code()
                .map_or(Cow::Borrowed(FG_DEFAULT), |color| color.to_fg_str());
            sgr(buf, &[&fg, BOLD]);
            buf.extend_from_slice(tag.label().as_bytes());
            sgr(buf, &[BOLD_OFF, &Color::BrightBlack.to_fg_str()]);
            buf.push(b']');
            push_reset(buf);
            buf.push(b' ');
        } else {
            buf.push(b'[');
            buf.extend_from_slice(tag.label().as_bytes());
            buf.extend_from_slice(b"] ");
        }
    }

    if !prefix.is_empty() {
        buf.extend_from_slice(prefix.as_bytes());
        buf.push(b' ');
    }
}

fn push_timestamp<Tz: TimeZone>(buf: &mut Vec<u8>, t: &DateTime<Tz>, features: Features) {
    // Writes into a Vec cannot fail.
    if features.contains(Features::DATE) {
        let _ = write!(buf, "{:04}-{:02}-{:02} ", t.year(), t.month(), t.day());
    }
    if features.has_clock() {
        let _ = write!(buf, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
        if features.has_subsecond() {
            // leap seconds report nanos >= 1e9
            let nanos = t.nanosecond() % 1_000_000_000;
            if features.contains(Features::MICROSECONDS) {
                let _ = write!(buf, ".{:06}", nanos / 1_000);
            } else {
                let _ = write!(buf, ".{:03}", nanos / 1_000_000);
            }
        }
        buf.push(b' ');
    }
}
