//! Timestamp rendering modes
//!
//! A record's timestamp is rendered once, when the record is stamped, using
//! one of a closed set of formats. [`TimestampMode`] is the configuration
//! value: either disabled or enabled with a format. Older configuration
//! shapes (a bare boolean, a format name, or a `{state, format}` object) are
//! converted into it when deserializing and nowhere else.

use super::error::LoggerError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an enabled timestamp is rendered
///
/// # Examples
///
/// ```
/// use sink_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2019, 7, 1, 14, 43, 35).unwrap();
/// assert_eq!(TimestampFormat::Utc.format(&at), "Mon, 01 Jul 2019 14:43:35 GMT");
/// assert_eq!(TimestampFormat::Numeric.format(&at), "1561992215000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimestampFormat {
    /// `Mon, 01 Jul 2019 14:43:35 GMT`
    #[default]
    Utc,

    /// Local date and time: `7/1/2019, 2:43:35 PM`
    Locale,

    /// Local date only: `7/1/2019`
    LocaleDate,

    /// Local time only: `2:43:35 PM`
    LocaleTime,

    /// Milliseconds since the Unix epoch: `1561992215000`
    Numeric,
}

impl TimestampFormat {
    /// Render `datetime` in this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Utc => datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            TimestampFormat::Locale => datetime
                .with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string(),
            TimestampFormat::LocaleDate => datetime
                .with_timezone(&Local)
                .format("%-m/%-d/%Y")
                .to_string(),
            TimestampFormat::LocaleTime => datetime
                .with_timezone(&Local)
                .format("%-I:%M:%S %p")
                .to_string(),
            TimestampFormat::Numeric => datetime.timestamp_millis().to_string(),
        }
    }

    /// Canonical configuration name
    pub fn to_str(&self) -> &'static str {
        match self {
            TimestampFormat::Utc => "utc",
            TimestampFormat::Locale => "locale",
            TimestampFormat::LocaleDate => "locale-date",
            TimestampFormat::LocaleTime => "locale-time",
            TimestampFormat::Numeric => "numeric",
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utc" | "gmt" => Ok(TimestampFormat::Utc),
            "locale" => Ok(TimestampFormat::Locale),
            "locale-date" | "localedate" => Ok(TimestampFormat::LocaleDate),
            "locale-time" | "localetime" => Ok(TimestampFormat::LocaleTime),
            "numeric" | "number" => Ok(TimestampFormat::Numeric),
            _ => Err(LoggerError::config(
                "TimestampFormat",
                format!("Invalid timestamp format: '{}'", s),
            )),
        }
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.to_str().to_string()
    }
}

/// Whether records carry a timestamp, and in which format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimestampRepr", into = "String")]
pub enum TimestampMode {
    Disabled,
    Enabled(TimestampFormat),
}

impl Default for TimestampMode {
    fn default() -> Self {
        TimestampMode::Enabled(TimestampFormat::default())
    }
}

impl TimestampMode {
    /// Render `datetime`, or `None` when timestamps are disabled
    #[must_use]
    pub fn render(&self, datetime: &DateTime<Utc>) -> Option<String> {
        match self {
            TimestampMode::Disabled => None,
            TimestampMode::Enabled(format) => Some(format.format(datetime)),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, TimestampMode::Enabled(_))
    }
}

impl From<bool> for TimestampMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            TimestampMode::default()
        } else {
            TimestampMode::Disabled
        }
    }
}

impl From<TimestampFormat> for TimestampMode {
    fn from(format: TimestampFormat) -> Self {
        TimestampMode::Enabled(format)
    }
}

impl FromStr for TimestampMode {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "disabled" => Ok(TimestampMode::Disabled),
            _ => s.parse().map(TimestampMode::Enabled),
        }
    }
}

impl From<TimestampMode> for String {
    fn from(mode: TimestampMode) -> Self {
        match mode {
            TimestampMode::Disabled => "none".to_string(),
            TimestampMode::Enabled(format) => format.into(),
        }
    }
}

/// Accepted configuration shapes for a timestamp setting
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Flag(bool),
    Name(String),
    Detailed {
        state: bool,
        #[serde(default)]
        format: Option<String>,
    },
}

impl TryFrom<TimestampRepr> for TimestampMode {
    type Error = LoggerError;

    fn try_from(repr: TimestampRepr) -> Result<Self, Self::Error> {
        match repr {
            TimestampRepr::Flag(enabled) => Ok(enabled.into()),
            TimestampRepr::Name(name) => name.parse(),
            TimestampRepr::Detailed { state: false, .. } => Ok(TimestampMode::Disabled),
            TimestampRepr::Detailed { state: true, format: None } => Ok(TimestampMode::default()),
            TimestampRepr::Detailed { state: true, format: Some(format) } => {
                format.parse().map(TimestampMode::Enabled)
            }
        }
    }
}
