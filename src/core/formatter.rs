//! Canonical text rendering of log records
//!
//! A record renders as `[timestamp] [LEVEL] [name] [context] text`. Each
//! present field is wrapped in brackets and followed by one space; absent or
//! empty fields are skipped entirely, so there are never empty brackets or
//! doubled spaces. Rendering is pure: the timestamp was resolved when the
//! record was stamped.

use super::log_record::{LogRecord, RecordText};

/// Line terminator appended by the file sink
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator appended by the file sink
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

fn push_field(out: &mut String, field: &str) {
    if field.is_empty() {
        return;
    }
    out.push('[');
    out.push_str(field);
    out.push_str("] ");
}

fn write_header(out: &mut String, record: &LogRecord) {
    if let Some(timestamp) = record.timestamp() {
        push_field(out, timestamp);
    }
    push_field(out, record.level().code());
    push_field(out, record.name());
    if let Some(context) = record.context() {
        push_field(out, context);
    }
}

/// Render a record as a single line (without terminator)
///
/// # Examples
///
/// ```
/// use sink_logger::core::{format, LogLevel, LogRecord};
///
/// let record = LogRecord::new("App", LogLevel::Info, "Test")
///     .unwrap()
///     .with_context(Some("User"));
/// assert_eq!(format(&record), "[INF] [App] [User] Test");
/// ```
pub fn format(record: &LogRecord) -> String {
    let mut out = String::with_capacity(64);
    write_header(&mut out, record);
    match record.text() {
        RecordText::Text(text) => out.push_str(text),
        RecordText::Structured(value) => out.push_str(&value.to_string()),
    }
    out
}

/// Render only the bracketed fields, without the payload or a trailing space
///
/// Used as the marker line that precedes a structured payload on the console.
pub fn format_header(record: &LogRecord) -> String {
    let mut out = String::with_capacity(48);
    write_header(&mut out, record);
    out.truncate(out.trim_end().len());
    out
}
