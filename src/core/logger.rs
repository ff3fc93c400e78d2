//! Main logger implementation

use super::{
    config::LoggerConfig,
    drain::{Queue, DEFAULT_QUEUE_CAPACITY},
    error::{LoggerError, Result},
    features::Features,
    header,
    line_logger::LineLogger,
    log_level::LogLevel,
    origin::simplify_source_path,
    record::{Record, Tag},
    sink::{Sink, SinkSlot},
    terminal::with_auto_color,
    timer::Timer,
};
use crate::sinks::ConsoleSink;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Size of the line buffer used when a severity is written inline
const INLINE_BUFFER_CAPACITY: usize = 256;

/// Per-logger configuration. Copied into a derived logger, then independent.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) level: LogLevel,
    pub(crate) features: Features,
    pub(crate) prefix: String,
}

/// State a logger shares with the records it has produced.
pub(crate) struct LoggerShared {
    pub(crate) settings: RwLock<Settings>,
    /// `None` once a derived logger is closed
    queue: RwLock<Option<Arc<Queue>>>,
    pub(crate) sink: Arc<SinkSlot>,
    parent: Option<Arc<LoggerShared>>,
}

impl LoggerShared {
    fn queue(&self) -> Option<Arc<Queue>> {
        self.queue.read().clone()
    }

    /// Render `message` now and send the record on its way.
    ///
    /// Severities flagged `SYNC_*` are written on the calling thread and skip
    /// the queue; they are not ordered against records already queued.
    pub(crate) fn submit(self: &Arc<Self>, tag: Tag, message: impl fmt::Display) {
        let Some(queue) = self.queue() else {
            return;
        };

        let timestamp = Utc::now();
        let mut buf = queue.pool().acquire();
        // Writes into a Vec only fail if a Display impl reports an error.
        let _ = write!(buf, "{}", message);
        let record = Record::new(tag, timestamp, buf, Arc::clone(self));

        let inline = self
            .settings
            .read()
            .features
            .intersects(Features::sync_for(tag));

        if inline {
            let mut line = Vec::with_capacity(INLINE_BUFFER_CAPACITY);
            if let Err(failure) = record.write(&mut line) {
                eprintln!(
                    "[LOGGER ERROR] Inline write to sink '{}' failed: {}",
                    failure.sink, failure.source
                );
            }
            queue.pool().release(record.into_message());
        } else {
            // A closed queue drops the record; writing after close is a caller error.
            let _ = queue.push(record);
        }
    }
}

/// A handle for writing log lines.
///
/// A root logger (from [`Logger::new`] or [`Logger::builder`]) owns a bounded
/// queue and the thread that drains it into the sink. [`Logger::sub_logger`]
/// derives loggers that push into the same queue and write to the same sink
/// but keep their own level, features and prefix.
///
/// All methods take `&self`; share a logger between threads with `Arc` or
/// scoped borrows.
///
/// # Examples
///
/// ```
/// use rust_queue_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(sink.clone(), "", LogLevel::Info, Features::PREFIX);
/// let db = logger.sub_logger("[db]");
///
/// logger.info("starting");
/// db.warn(format_args!("slow query: {}ms", 250));
/// logger.sync().unwrap();
///
/// assert_eq!(sink.contents(), "[info] starting\n[warn] [db] slow query: 250ms\n");
/// ```
pub struct Logger {
    shared: Arc<LoggerShared>,
    /// Drain thread of a root logger; taken on close
    drain: Option<Mutex<Option<JoinHandle<()>>>>,
}

impl Logger {
    /// Create a root logger writing to `sink`.
    ///
    /// With `COLOR_AUTO` in `features`, `COLOR` is added when the sink is a
    /// color-capable terminal.
    #[must_use]
    pub fn new(
        sink: impl Sink + 'static,
        prefix: impl Into<String>,
        level: LogLevel,
        features: Features,
    ) -> Self {
        Self::root(
            Box::new(sink),
            prefix.into(),
            level,
            features,
            DEFAULT_QUEUE_CAPACITY,
        )
    }

    fn root(
        sink: Box<dyn Sink>,
        prefix: String,
        level: LogLevel,
        features: Features,
        queue_capacity: usize,
    ) -> Self {
        let sink = Arc::new(SinkSlot::new(sink));
        let features = if features.contains(Features::COLOR_AUTO) {
            with_auto_color(&sink, features)
        } else {
            features
        };
        let (queue, handle) = Queue::start(queue_capacity);

        Self {
            shared: Arc::new(LoggerShared {
                settings: RwLock::new(Settings {
                    level,
                    features,
                    prefix,
                }),
                queue: RwLock::new(Some(queue)),
                sink,
                parent: None,
            }),
            drain: Some(Mutex::new(Some(handle))),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_queue_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .features(Features::TIME | Features::PREFIX)
    ///     .sink(MemorySink::new())
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.enabled(LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that appends `suffix` to this logger's prefix.
    ///
    /// The new logger starts with a copy of this logger's level and features,
    /// shares its queue and sink, and never owns a drain thread.
    #[must_use]
    pub fn sub_logger(&self, suffix: &str) -> Logger {
        let settings = {
            let current = self.shared.settings.read();
            Settings {
                level: current.level,
                features: current.features,
                prefix: format!("{}{}", current.prefix, suffix),
            }
        };

        Logger {
            shared: Arc::new(LoggerShared {
                settings: RwLock::new(settings),
                queue: RwLock::new(self.shared.queue()),
                sink: Arc::clone(&self.shared.sink),
                parent: Some(Arc::clone(&self.shared)),
            }),
            drain: None,
        }
    }

    /// Whether this logger owns its queue and drain thread
    pub fn is_root(&self) -> bool {
        self.drain.is_some()
    }

    /// Whether this logger was derived from another one
    pub fn has_parent(&self) -> bool {
        self.shared.parent.is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.shared.settings.read().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.shared.settings.write().level = level;
    }

    /// Whether a message at `level` would be written
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Disabled && level >= self.level()
    }

    pub fn features(&self) -> Features {
        self.shared.settings.read().features
    }

    /// Turn on `feats`. Enabling `COLOR_AUTO` may also turn on `COLOR`.
    pub fn enable_features(&self, feats: Features) {
        let mut feats = feats;
        if feats.contains(Features::COLOR_AUTO) && !self.features().contains(Features::COLOR) {
            feats = with_auto_color(&self.shared.sink, feats);
        }
        self.shared.settings.write().features |= feats;
    }

    /// Turn off `feats`. Disabling `COLOR_AUTO` also turns off `COLOR`.
    pub fn disable_features(&self, feats: Features) {
        let mut feats = feats;
        if feats.contains(Features::COLOR_AUTO) {
            feats |= Features::COLOR;
        }
        self.shared.settings.write().features -= feats;
    }

    pub fn prefix(&self) -> String {
        self.shared.settings.read().prefix.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.shared.settings.write().prefix = prefix.into();
    }

    /// Redirect output, returning the previous sink.
    ///
    /// The sink is shared with the root and every derived logger, and records
    /// that are already queued are written to the new sink. A write in
    /// progress finishes on the old sink; the old sink is then dropped and
    /// `None` is returned.
    pub fn set_sink(&self, sink: impl Sink + 'static) -> Option<Box<dyn Sink>> {
        self.shared.sink.replace(Box::new(sink))
    }

    /// Name of the current sink
    pub fn sink_name(&self) -> String {
        self.shared.sink.name()
    }

    /// Records waiting in the queue
    pub fn pending(&self) -> usize {
        self.shared.queue().map_or(0, |queue| queue.len())
    }

    /// Capacity of the queue, or 0 once detached
    pub fn queue_capacity(&self) -> usize {
        self.shared.queue().map_or(0, |queue| queue.capacity())
    }

    /// Log `message` at `level` if the level passes this logger's threshold.
    ///
    /// `message` is rendered right away, so it may borrow data the caller
    /// changes afterwards. Below the threshold it is never rendered.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if self.enabled(level) {
            self.shared.submit(Tag::Level(level), message);
        }
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    /// Log at debug level, annotated with the caller's location when the
    /// `DEBUG_ORIGIN` feature is on.
    ///
    /// Wrappers marked `#[track_caller]` pass their own caller through.
    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log_debug_with_origin(Location::caller(), message);
    }

    /// Debug message attributed to an explicit source location
    pub fn log_debug_with_origin(&self, origin: &Location<'_>, message: impl fmt::Display) {
        self.debug_at(origin.file(), origin.line(), message);
    }

    pub(crate) fn debug_at(&self, file: &str, line: u32, message: impl fmt::Display) {
        if !self.enabled(LogLevel::Debug) {
            return;
        }
        let features = self.features();
        if features.contains(Features::DEBUG_ORIGIN) {
            let annotated = WithOrigin {
                message,
                file: simplify_source_path(file),
                line,
                color: features.contains(Features::COLOR),
            };
            self.shared.submit(Tag::Level(LogLevel::Debug), annotated);
        } else {
            self.shared.submit(Tag::Level(LogLevel::Debug), message);
        }
    }

    /// Same as [`info`](Self::info)
    #[inline]
    pub fn printf(&self, message: impl fmt::Display) {
        self.info(message);
    }

    /// Same as [`warn`](Self::warn)
    #[inline]
    pub fn warning(&self, message: impl fmt::Display) {
        self.warn(message);
    }

    /// Start timing something. Finishing (or dropping) the returned [`Timer`]
    /// logs `"<label>: <elapsed>"` as a `[time]` line.
    ///
    /// When info messages are filtered out the timer does nothing, and the
    /// label is not rendered.
    pub fn timer(&self, label: impl fmt::Display) -> Timer {
        if self.level() > LogLevel::Info {
            return Timer::noop();
        }
        Timer::start(Arc::clone(&self.shared), label)
    }

    /// Adapter that writes whole lines at `level`.
    ///
    /// If `level` is below this logger's threshold right now, the adapter
    /// discards everything written to it.
    pub fn line_logger(&self, level: LogLevel) -> LineLogger {
        LineLogger::new(Arc::clone(&self.shared), level, self.enabled(level))
    }

    /// Block until every record enqueued before this call, by this logger or
    /// any logger sharing its queue, has been written.
    ///
    /// Returns the failure of the most recent queued write, if it failed.
    pub fn sync(&self) -> Result<()> {
        match self.shared.queue() {
            Some(queue) => queue.sync(),
            None => Err(LoggerError::LoggerClosed),
        }
    }

    /// Close this logger.
    ///
    /// A root logger syncs, then stops its drain thread; it and its derived
    /// loggers must not be used for writing afterwards. A derived logger only
    /// disables itself and lets go of the queue; the root and its other derived
    /// loggers are unaffected.
    pub fn close(&self) -> Result<()> {
        let Some(drain) = &self.drain else {
            self.shared.settings.write().level = LogLevel::Disabled;
            self.shared.queue.write().take();
            return Ok(());
        };

        let Some(handle) = drain.lock().take() else {
            return Ok(());
        };
        let Some(queue) = self.shared.queue.write().take() else {
            return Ok(());
        };

        let result = queue.sync();
        if let Err(e) = queue.stop() {
            eprintln!("[LOGGER ERROR] Failed to stop drain thread: {}", e);
        }
        if let Err(e) = handle.join() {
            eprintln!("[LOGGER ERROR] Drain thread panicked during shutdown: {:?}", e);
        }
        if let Err(e) = self.shared.sink.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush sink during shutdown: {}", e);
        }
        result
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.shared.settings.read();
        f.debug_struct("Logger")
            .field("level", &settings.level)
            .field("features", &settings.features)
            .field("prefix", &settings.prefix)
            .field("root", &self.is_root())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.is_root() {
            return;
        }
        match self.close() {
            Ok(()) => {}
            Err(e) if e.is_sink_write() => {
                eprintln!("[LOGGER WARNING] Last write before shutdown failed: {}", e);
            }
            Err(e) => eprintln!("[LOGGER ERROR] Failed to close logger: {}", e),
        }
    }
}

/// Debug message followed by ` (file:line)`
struct WithOrigin<M> {
    message: M,
    file: String,
    line: u32,
    color: bool,
}

impl<M: fmt::Display> fmt::Display for WithOrigin<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.message)?;
        if self.color {
            write!(
                f,
                "{}({}:{}){}",
                header::muted(),
                self.file,
                self.line,
                header::FG_RESET
            )
        } else {
            write!(f, "({}:{})", self.file, self.line)
        }
    }
}

/// Builder for constructing a root Logger with a fluent API
///
/// # Example
/// ```
/// use rust_queue_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .prefix("[app]")
///     .features(Features::DATE | Features::TIME | Features::PREFIX)
///     .queue_capacity(1000)
///     .sink(NullSink)
///     .build()
///     .unwrap();
/// assert_eq!(logger.queue_capacity(), 1000);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    features: Features,
    prefix: String,
    sink: Option<Box<dyn Sink>>,
    queue_capacity: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            features: Features::DEFAULT,
            prefix: String::new(),
            sink: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Start from a loaded configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .level(config.level)
            .features(config.features)
            .prefix(config.prefix.clone())
            .queue_capacity(config.queue_capacity)
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Replace the feature set
    #[must_use = "builder methods return a new value"]
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the output sink. Defaults to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Number of records that may wait before producers block
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "queue_capacity must be greater than 0",
            ));
        }
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));
        Ok(Logger::root(
            sink,
            self.prefix,
            self.level,
            self.features,
            self.queue_capacity,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
