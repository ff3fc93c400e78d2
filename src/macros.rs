//! Logging macros for ergonomic log message formatting.
//!
//! These macros check the logger's level *before* touching their arguments,
//! so a suppressed message evaluates none of its format arguments.
//!
//! # Examples
//!
//! ```
//! use rust_queue_logger::prelude::*;
//! use rust_queue_logger::info;
//!
//! let logger = Logger::new(MemorySink::new(), "", LogLevel::Info, Features::PREFIX);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at a given level.
///
/// # Examples
///
/// ```
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "", LogLevel::Info, Features::empty());
/// use rust_queue_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format_args!($($arg)+));
        }
    }};
}

/// Log a debug-level message, annotated with the macro's call site when the
/// logger has `DEBUG_ORIGIN`.
///
/// # Examples
///
/// ```
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "", LogLevel::Debug, Features::empty());
/// use rust_queue_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.enabled($crate::LogLevel::Debug) {
            logger.debug(format_args!($($arg)+));
        }
    }};
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "", LogLevel::Info, Features::empty());
/// use rust_queue_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Start a [`Timer`](crate::Timer) with a formatted label. The label is not
/// evaluated when info messages are filtered out.
///
/// # Examples
///
/// ```
/// # use rust_queue_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "", LogLevel::Info, Features::empty());
/// use rust_queue_logger::timer;
/// let t = timer!(logger, "import batch {}", 7);
/// t.finish();
/// ```
#[macro_export]
macro_rules! timer {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.enabled($crate::LogLevel::Info) {
            logger.timer(format_args!($($arg)+))
        } else {
            $crate::Timer::noop()
        }
    }};
}
