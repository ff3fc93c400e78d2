//! # Rust Queue Logger
//!
//! A hierarchical logger that hands formatted lines to a single background
//! drain thread through a bounded queue.
//!
//! ## Features
//!
//! - **Ordered output**: one drain thread writes every queued line, in the
//!   order each producer submitted them
//! - **Sub-loggers**: derived loggers share the queue and sink of their root
//!   and extend its prefix
//! - **Sync protocol**: [`Logger::sync`] returns once everything submitted
//!   before it has reached the sink
//! - **Sync severities**: selected levels bypass the queue and are written
//!   inline
//! - **Cheap filtering**: messages below the level are never rendered
//!
//! ```
//! use rust_queue_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(sink.clone(), "[app]", LogLevel::Info, Features::PREFIX);
//! let db = logger.sub_logger("[db]");
//!
//! logger.info("starting");
//! db.warn(format_args!("slow query: {}ms", 250));
//! logger.sync().unwrap();
//!
//! assert_eq!(sink.lines(), vec![
//!     "[info] [app] starting",
//!     "[warn] [app][db] slow query: 250ms",
//! ]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

#[cfg(feature = "log")]
mod bridge;
mod global;

pub use global::{debug, default_logger, error, info, printf, sub_logger, sync, timer, warn};

#[cfg(feature = "log")]
pub use bridge::LogBridge;

pub mod prelude {
    pub use crate::core::{
        Features, LineLogger, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Result,
        Sink, Tag, Timer,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, NullSink, WriterSink};
}

pub use core::{
    format_header, simplify_source_path, term_supports_color, BufferPool, Features, LineLogger,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Result, Sink, Tag, Timer,
    DEFAULT_QUEUE_CAPACITY,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, NullSink, WriterSink};
