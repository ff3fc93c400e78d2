//! Elapsed-time measurement logged as `[time]` lines

use super::logger::LoggerShared;
use super::record::Tag;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A running measurement started by [`Logger::timer`](super::logger::Logger::timer).
///
/// Call [`finish`](Timer::finish) to log the elapsed time, or let the timer
/// go out of scope to time the enclosing block:
///
/// ```
/// use rust_queue_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(sink.clone(), "", LogLevel::Info, Features::PREFIX);
/// {
///     let _t = logger.timer(format_args!("load {}", "config"));
///     // ... work ...
/// }
/// logger.sync().unwrap();
/// assert!(sink.contents().starts_with("[time] load config: "));
/// ```
#[must_use = "dropping a Timer right away logs an elapsed time of almost zero"]
pub struct Timer {
    running: Option<Running>,
}

struct Running {
    owner: Arc<LoggerShared>,
    label: String,
    start: Instant,
}

impl Timer {
    pub(crate) fn start(owner: Arc<LoggerShared>, label: impl fmt::Display) -> Self {
        let start = Instant::now();
        // rendered now; the label may borrow state that changes before finish
        let label = label.to_string();
        Self {
            running: Some(Running {
                owner,
                label,
                start,
            }),
        }
    }

    /// A timer that logs nothing
    pub fn noop() -> Self {
        Self { running: None }
    }

    /// Whether finishing this timer will log a line
    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// Time since the timer started, or `None` for a disabled timer
    pub fn elapsed(&self) -> Option<Duration> {
        self.running.as_ref().map(|r| r.start.elapsed())
    }

    /// Log the elapsed time now
    pub fn finish(mut self) {
        self.emit();
    }

    fn emit(&mut self) {
        if let Some(running) = self.running.take() {
            let message = Elapsed {
                label: &running.label,
                elapsed: running.start.elapsed(),
            };
            running.owner.submit(Tag::Timing, message);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.emit();
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.running {
            Some(running) => f
                .debug_struct("Timer")
                .field("label", &running.label)
                .field("elapsed", &running.start.elapsed())
                .finish(),
            None => f.write_str("Timer(disabled)"),
        }
    }
}

struct Elapsed<'a> {
    label: &'a str,
    elapsed: Duration,
}

impl fmt::Display for Elapsed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{:?}", self.elapsed)
        } else {
            write!(f, "{}: {:?}", self.label, self.elapsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_message() {
        let msg = Elapsed {
            label: "query",
            elapsed: Duration::from_micros(6597),
        };
        assert_eq!(msg.to_string(), "query: 6.597ms");

        let msg = Elapsed {
            label: "",
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(msg.to_string(), "1.5s");
    }

    #[test]
    fn test_disabled_timer() {
        let timer = Timer::noop();
        assert!(!timer.is_active());
        assert_eq!(timer.elapsed(), None);
        timer.finish();
    }
}
