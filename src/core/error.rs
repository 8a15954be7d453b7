//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// Document store operation failed
    #[error("Document store error during {operation}: {message}")]
    StoreError { operation: String, message: String },

    /// The record was written, but evicting the oldest retained record failed
    #[error("Record written to '{sink}' but eviction of the oldest record failed: {source}")]
    EvictionFailed {
        sink: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
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

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a document store error
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::StoreError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure that happened after the triggering record was written
    pub fn eviction(sink: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::EvictionFailed {
            sink: sink.into(),
            source: Box::new(source),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error was raised while validating configuration
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::InvalidConfiguration { .. })
    }

    /// Whether the triggering record reached the sink despite this error
    #[must_use]
    pub fn record_was_written(&self) -> bool {
        matches!(self, LoggerError::EvictionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LogLevel", "unknown level 'loud'");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.is_configuration());

        let err = LoggerError::file_sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
        assert!(!err.is_configuration());

        let err = LoggerError::store("insert_one", "connection reset");
        assert!(matches!(err, LoggerError::StoreError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("TimestampFormat", "unknown format 'iso'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for TimestampFormat: unknown format 'iso'"
        );

        let err = LoggerError::file_sink("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File sink error for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::store("delete_one", "timeout");
        assert_eq!(
            err.to_string(),
            "Document store error during delete_one: timeout"
        );
    }

    #[test]
    fn test_eviction_error_keeps_source() {
        let inner = LoggerError::file_sink("app.log", "rename failed");
        let err = LoggerError::eviction("file", inner);

        assert!(err.record_was_written());
        assert!(err.to_string().contains("rename failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
