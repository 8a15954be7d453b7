//! Core logger types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config::{merge_values, LoggerConfig, RetentionPolicy};
pub use error::{LoggerError, Result};
pub use formatter::{format, format_header, LINE_ENDING};
pub use log_level::LogLevel;
pub use log_record::{LogRecord, RecordText};
pub use logger::{LogOutcome, Logger, LoggerBuilder, Payload};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use timestamp::{TimestampFormat, TimestampMode};
