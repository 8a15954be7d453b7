//! Log record structure

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload carried by a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordText {
    Text(String),
    Structured(Value),
}

impl RecordText {
    /// Render as a single string; structured values become compact JSON
    pub fn to_text(&self) -> String {
        match self {
            RecordText::Text(text) => text.clone(),
            RecordText::Structured(value) => value.to_string(),
        }
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, RecordText::Structured(_))
    }
}

impl From<String> for RecordText {
    fn from(s: String) -> Self {
        RecordText::Text(s)
    }
}

impl From<&str> for RecordText {
    fn from(s: &str) -> Self {
        RecordText::Text(s.to_string())
    }
}

impl From<Value> for RecordText {
    fn from(value: Value) -> Self {
        RecordText::Structured(value)
    }
}

/// One timestamp-resolved log entry
///
/// Records are assembled with the consuming `with_*`/`stamped*` methods and
/// are read-only afterwards. The timestamp is rendered when the record is
/// stamped, so formatting the same record twice always gives the same text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    name: String,
    level: LogLevel,
    context: Option<String>,
    text: RecordText,
    timestamp: Option<String>,
}

impl LogRecord {
    /// Escape line breaks and tabs so one record always occupies one line
    ///
    /// Applied to every free-form field that reaches the formatted line:
    /// name, context and textual payloads.
    fn sanitize_text(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Create an unstamped record
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `name` is empty.
    pub fn new(name: impl Into<String>, level: LogLevel, text: impl Into<RecordText>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LoggerError::config("LogRecord", "logger name must not be empty"));
        }
        let name = Self::sanitize_text(&name);

        let text = match text.into() {
            RecordText::Text(text) => RecordText::Text(Self::sanitize_text(&text)),
            structured => structured,
        };

        Ok(Self {
            name,
            level,
            context: None,
            text,
            timestamp: None,
        })
    }

    /// Attach a context label; empty labels are dropped
    pub fn with_context(mut self, context: Option<impl Into<String>>) -> Self {
        self.context = context
            .map(Into::into)
            .filter(|c: &String| !c.is_empty())
            .map(|c| Self::sanitize_text(&c));
        self
    }

    /// Resolve the timestamp from the current clock
    pub fn stamped(self, mode: TimestampMode) -> Self {
        self.stamped_at(mode, Utc::now())
    }

    /// Resolve the timestamp from a given instant
    pub fn stamped_at(mut self, mode: TimestampMode, at: DateTime<Utc>) -> Self {
        self.timestamp = mode.render(&at);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn text(&self) -> &RecordText {
        &self.text
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Replace a structured payload with its JSON text
    pub(crate) fn into_textual(mut self) -> Self {
        if let RecordText::Structured(value) = &self.text {
            self.text = RecordText::Text(value.to_string());
        }
        self
    }
}
