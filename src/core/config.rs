//! Logger configuration
//!
//! [`LoggerConfig`] is the value a [`Logger`](super::Logger) is built from.
//! It deserializes from JSON, accepting both the current camelCase keys and
//! the older spellings (`maxlogs`, `maxsize`, `objects_to_string`).
//! Partial overrides are applied with [`merge_values`], a local deep merge.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Retention limits enforced by durable sinks
///
/// A limit of `0` means unbounded. `max_size` only applies to the file sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Maximum number of retained records
    pub max_logs: u64,
    /// Maximum cumulative byte size
    pub max_size: u64,
}

impl RetentionPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_logs(mut self, max_logs: u64) -> Self {
        self.max_logs = max_logs;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Whether `retained` records already reach the count limit
    #[must_use]
    pub fn count_exceeded(&self, retained: u64) -> bool {
        self.max_logs > 0 && retained >= self.max_logs
    }

    /// Whether `size` bytes already reach the size limit
    #[must_use]
    pub fn size_exceeded(&self, size: u64) -> bool {
        self.max_size > 0 && size >= self.max_size
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max_logs == 0 && self.max_size == 0
    }
}

/// Configuration owned by one logger
///
/// # Examples
///
/// ```
/// use sink_logger::core::{LoggerConfig, LogLevel, TimestampMode};
///
/// let config = LoggerConfig::from_json_str(
///     r#"{"name": "App", "level": "debug", "timestamp": false, "maxlogs": 100}"#,
/// ).unwrap();
///
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.timestamp, TimestampMode::Disabled);
/// assert_eq!(config.max_logs, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Logger identity carried into every record
    pub name: String,
    /// Minimum severity emitted
    pub level: LogLevel,
    /// Master switch for emission
    pub enabled: bool,
    /// Optional label carried into every record
    pub context: Option<String>,
    /// Timestamp rendering
    pub timestamp: TimestampMode,
    /// Maximum retained records, `0` for unbounded
    #[serde(alias = "maxlogs", alias = "max_logs")]
    pub max_logs: u64,
    /// Maximum file size in bytes, `0` for unbounded
    #[serde(alias = "maxsize", alias = "max_size")]
    pub max_size: u64,
    /// Serialize structured payloads to text even when the sink could store them
    #[serde(alias = "objects_to_string", alias = "objects_as_text")]
    pub objects_as_text: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: LogLevel::default(),
            enabled: true,
            context: None,
            timestamp: TimestampMode::default(),
            max_logs: 0,
            max_size: 0,
            objects_as_text: false,
        }
    }
}

impl LoggerConfig {
    /// Create a configuration with defaults for the named logger
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check the invariants deserialization cannot express
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "name must not be empty"));
        }
        Ok(())
    }

    /// Build from a JSON value
    ///
    /// # Errors
    ///
    /// Unknown level or timestamp names, wrongly typed fields and an empty
    /// name are all reported as configuration errors.
    pub fn from_value(value: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        Self::from_value(value)
    }

    /// Return a copy with `overrides` deep-merged on top of this configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use sink_logger::core::{LoggerConfig, LogLevel};
    /// use serde_json::json;
    ///
    /// let base = LoggerConfig::new("App");
    /// let merged = base.with_overrides(&json!({"level": "error", "context": "Db"})).unwrap();
    ///
    /// assert_eq!(merged.name, "App");
    /// assert_eq!(merged.level, LogLevel::Error);
    /// assert_eq!(merged.context.as_deref(), Some("Db"));
    /// ```
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let base = serde_json::to_value(self)?;
        Self::from_value(merge_values(&base, overrides))
    }

    /// Retention limits derived from this configuration
    #[must_use]
    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_logs: self.max_logs,
            max_size: self.max_size,
        }
    }
}

/// Deep-merge two JSON values into a new one
///
/// Objects are merged key by key, recursively; any other overlay value
/// (including arrays and `null`) replaces the base value.
pub fn merge_values(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let value = match base_map.get(key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}
