//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and returns the logger's
//! future, so the call site still decides when to `.await`.
//!
//! # Examples
//!
//! ```no_run
//! use sink_logger::prelude::*;
//! use sink_logger::info;
//!
//! # async fn example() -> sink_logger::Result<()> {
//! let mut logger = LoggerBuilder::new("Server").build(ConsoleSink::new())?;
//!
//! info!(logger, "Server started").await?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).await?;
//! # Ok(())
//! # }
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use sink_logger::prelude::*;
/// use sink_logger::log;
/// # async fn example() -> sink_logger::Result<()> {
/// # let mut logger = LoggerBuilder::new("App").build(ConsoleSink::new())?;
/// log!(logger, LogLevel::Info, "Simple message").await?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, ::std::format!($($arg)+))
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
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
/// ```no_run
/// # use sink_logger::prelude::*;
/// use sink_logger::warning;
/// # async fn example() -> sink_logger::Result<()> {
/// # let mut logger = LoggerBuilder::new("App").build(ConsoleSink::new())?;
/// warning!(logger, "Disk usage at {}%", 91).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
