//! Core logger types and traits

pub mod config;
pub mod drain;
pub mod error;
pub mod features;
pub mod header;
pub mod line_logger;
pub mod log_level;
pub mod logger;
pub mod origin;
pub mod pool;
pub mod record;
pub mod sink;
pub mod terminal;
pub mod timer;

pub use config::LoggerConfig;
pub use drain::DEFAULT_QUEUE_CAPACITY;
pub use error::{LoggerError, Result};
pub use features::Features;
pub use header::format_header;
pub use line_logger::LineLogger;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use origin::simplify_source_path;
pub use pool::BufferPool;
pub use record::Tag;
pub use sink::Sink;
pub use terminal::term_supports_color;
pub use timer::Timer;
