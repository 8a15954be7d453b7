//! # Sink Logger
//!
//! Named, leveled loggers that write to a single pluggable sink, with
//! count- and size-based retention for durable sinks.
//!
//! ## Features
//!
//! - **Leveled records**: verbose, debug, info, warning and error, with a
//!   per-logger threshold and on/off switch
//! - **Sinks**: console (stdout/stderr split), append-only file, and
//!   document collection, plus a console mirror composite
//! - **Retention**: keep at most `max_logs` records or `max_size` bytes by
//!   evicting the oldest record first
//! - **Serde configuration**: JSON configs with deep-merge overrides
//!
//! ## Example
//!
//! ```no_run
//! use sink_logger::prelude::*;
//!
//! # async fn example() -> sink_logger::Result<()> {
//! let sink = FileSink::new("logs/app.log").await?;
//! let mut logger = LoggerBuilder::new("App")
//!     .context("Startup")
//!     .max_logs(1000)
//!     .build(sink)?;
//!
//! logger.info("Application started").await?;
//! logger.warning(serde_json::json!({"disk": "92%"})).await?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LogLevel, LogOutcome, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Payload, Result, RetentionPolicy, Sink, TimestampFormat, TimestampMode,
    };
    pub use crate::sinks::{
        CollectionSink, ConsoleSink, DocumentStore, FileSink, MemoryCollection, MirrorSink,
    };
}

pub use crate::core::{
    LogLevel, LogOutcome, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Payload, Result, RetentionPolicy, Sink, TimestampFormat, TimestampMode,
};
pub use crate::sinks::{CollectionSink, ConsoleSink, FileSink, MemoryCollection, MirrorSink};
