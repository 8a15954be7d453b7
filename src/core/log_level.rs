//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Verbose = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
}

impl LogLevel {
    /// Every level, least severe first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Canonical configuration name
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Fixed three-letter code used in rendered records
    pub fn code(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VRB",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Verbose => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Accepts the canonical names and the three-letter codes, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "vrb" => Ok(LogLevel::Verbose),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warning" | "warn" | "wrn" => Ok(LogLevel::Warning),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(LoggerError::config(
                "LogLevel",
                format!("Invalid log level: '{}'", s),
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    // `Self::Error` would be ambiguous with the `Error` variant
    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_severity() {
        assert!(LogLevel::Verbose < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_codes() {
        let codes: Vec<&str> = LogLevel::ALL.iter().map(LogLevel::code).collect();
        assert_eq!(codes, vec!["VRB", "DBG", "INF", "WRN", "ERR"]);
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("ERR".parse::<LogLevel>().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_unknown_name_is_configuration_error() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(LogLevel::try_from("Error".to_string()).unwrap(), LogLevel::Error);

        let err: LoggerError = LogLevel::try_from(String::from("shout")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, "\"warning\"");

        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);

        assert!(serde_json::from_str::<LogLevel>("\"chatty\"").is_err());
    }
}
