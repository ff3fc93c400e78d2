//! Error types for the logger system

use std::sync::Arc;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A sink rejected a record. Reported by the next `sync()`.
    #[error("Write to sink '{sink}' failed: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (configuration) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The logger's queue is closed or was detached
    #[error("Logger is closed")]
    LoggerClosed,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Channel send error
    #[error("Failed to send record to drain thread")]
    ChannelSendError,

    /// Channel receive error
    #[error("Failed to receive sync response from drain thread")]
    ChannelReceiveError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: Arc<std::io::Error>) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error came from a sink write
    pub fn is_sink_write(&self) -> bool {
        matches!(self, LoggerError::SinkWrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let io = Arc::new(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"));
        let err = LoggerError::sink_write("file", io);
        assert!(err.is_sink_write());

        let err = LoggerError::config("LoggerConfig", "queue_capacity must be > 0");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(!err.is_sink_write());
    }

    #[test]
    fn test_error_display() {
        let io = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = LoggerError::sink_write("file", io);
        assert_eq!(err.to_string(), "Write to sink 'file' failed: disk full");

        let err = LoggerError::config("Features", "unknown flag 'bogus'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Features: unknown flag 'bogus'"
        );

        assert_eq!(LoggerError::LoggerClosed.to_string(), "Logger is closed");
    }

    #[test]
    fn test_sink_write_source() {
        use std::error::Error;

        let io = Arc::new(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let err = LoggerError::sink_write("console", Arc::clone(&io));
        let source = err.source().expect("sink write error has a source");
        assert!(source.to_string().contains("access denied"));
    }
}
