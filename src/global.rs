//! Process-wide default logger
//!
//! [`default_logger`] is built on first use: stdout, level `info`,
//! [`Features::DEFAULT`]. The free functions here write through it. Nothing
//! in the core depends on this logger; applications that want another setup
//! build their own [`Logger`] and pass it around instead.

use crate::core::{Features, LogLevel, Logger, Result, Timer};
use crate::sinks::ConsoleSink;
use std::fmt;
use std::sync::OnceLock;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide root logger
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER
        .get_or_init(|| Logger::new(ConsoleSink::stdout(), "", LogLevel::Info, Features::DEFAULT))
}

pub fn error(message: impl fmt::Display) {
    default_logger().error(message);
}

pub fn warn(message: impl fmt::Display) {
    default_logger().warn(message);
}

pub fn info(message: impl fmt::Display) {
    default_logger().info(message);
}

/// Same as [`info`]
pub fn printf(message: impl fmt::Display) {
    default_logger().info(message);
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    default_logger().debug(message);
}

pub fn timer(label: impl fmt::Display) -> Timer {
    default_logger().timer(label)
}

/// Derive a logger from the default logger
pub fn sub_logger(suffix: &str) -> Logger {
    default_logger().sub_logger(suffix)
}

/// Wait until everything logged through the default logger is written
pub fn sync() -> Result<()> {
    default_logger().sync()
}
