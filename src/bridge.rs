//! Bridge for libraries that log through the `log` facade

use crate::core::{LogLevel, Logger};

/// Routes `log` crate records into a [`Logger`].
///
/// `Trace` and `Debug` map to debug, the rest map one to one. `flush` waits
/// for the logger's queue to drain.
///
/// ```no_run
/// use rust_queue_logger::prelude::*;
/// use rust_queue_logger::LogBridge;
///
/// let logger = Logger::builder().level(LogLevel::Debug).build().unwrap();
/// LogBridge::new(logger).install().unwrap();
/// log::info!("routed through the queue");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Install as the global `log` logger, with the max level taken from the
    /// logger's current level
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let max = level_filter(self.logger.level());
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max);
        Ok(())
    }
}

fn map_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug | log::Level::Trace => LogLevel::Debug,
    }
}

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Debug => log::LevelFilter::Trace,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Disabled => log::LevelFilter::Off,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = map_level(record.level());
        match (level, record.file(), record.line()) {
            (LogLevel::Debug, Some(file), Some(line)) => {
                self.logger.debug_at(file, line, record.args());
            }
            _ => self.logger.log(level, record.args()),
        }
    }

    fn flush(&self) {
        if let Err(e) = self.logger.sync() {
            eprintln!("[LOGGER ERROR] Flush through log bridge failed: {}", e);
        }
    }
}
