//! Property-based tests for sink_logger using proptest

use proptest::prelude::*;
use serde_json::{json, Value};
use sink_logger::core::{format, format_header, merge_values};
use sink_logger::prelude::*;
use sink_logger::sinks::sanitize_value;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Verbose),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
    ]
}

/// Arbitrary JSON with keys that may contain `$` and `.`
fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z$.]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z$.]{0,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn keys_are_clean(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .all(|(k, v)| !k.contains('$') && !k.contains('.') && keys_are_clean(v)),
        Value::Array(items) => items.iter().all(keys_are_clean),
        _ => true,
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Names and codes both parse back to the same level
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        prop_assert_eq!(level.to_str().parse::<LogLevel>().unwrap(), level);
        prop_assert_eq!(level.code().parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_upper in any::<bool>()) {
        let name = if use_upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(name.parse::<LogLevel>().unwrap(), level);
    }

    /// Test that LogLevel ordering matches severity
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    #[test]
    fn test_log_level_invalid_parse(invalid in "[qxyz]{1,10}") {
        let err = invalid.parse::<LogLevel>().unwrap_err();
        prop_assert!(err.is_configuration());
    }

    #[test]
    fn test_log_level_json_serialization(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        prop_assert_eq!(json.clone(), format!("\"{}\"", level.to_str()));
        let back: LogLevel = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, level);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Whatever the text, a record renders on exactly one line
    #[test]
    fn test_format_single_line(message in ".*", level in any_level()) {
        let record = LogRecord::new("App", level, message.as_str()).unwrap();
        let line = format(&record);

        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        prop_assert!(!line.contains('\t'));
    }

    #[test]
    fn test_format_field_order(
        name in "[A-Za-z]{1,12}",
        context in proptest::option::of("[A-Za-z]{1,12}"),
        message in "[a-z ]{0,40}",
        level in any_level(),
    ) {
        let record = LogRecord::new(name.as_str(), level, message.as_str())
            .unwrap()
            .with_context(context.clone());

        let expected = match &context {
            Some(ctx) => format!("[{}] [{}] [{}] {}", level.code(), name, ctx, message),
            None => format!("[{}] [{}] {}", level.code(), name, message),
        };
        prop_assert_eq!(format(&record), expected);
    }

    /// The marker line is always a prefix of the full line, with no trailing space
    #[test]
    fn test_header_is_prefix(name in "[A-Za-z]{1,12}", message in "[a-z]{1,20}", level in any_level()) {
        let record = LogRecord::new(name.as_str(), level, message.as_str()).unwrap();
        let header = format_header(&record);

        prop_assert!(format(&record).starts_with(&header));
        prop_assert!(!header.ends_with(' '));
    }

    #[test]
    fn test_numeric_timestamp_is_integer(message in "[a-z]{0,10}") {
        let record = LogRecord::new("App", LogLevel::Info, message.as_str())
            .unwrap()
            .stamped(TimestampMode::Enabled(TimestampFormat::Numeric));

        let timestamp = record.timestamp().unwrap();
        prop_assert!(timestamp.parse::<i64>().is_ok());
    }
}

// ============================================================================
// Sanitization and Config Tests
// ============================================================================

proptest! {
    #[test]
    fn test_sanitized_keys_never_reserved(value in any_json()) {
        prop_assert!(keys_are_clean(&sanitize_value(&value)));
    }

    /// Values without reserved characters pass through unchanged
    #[test]
    fn test_sanitize_clean_value_is_identity(
        map in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..6)
    ) {
        let value = Value::Object(map.into_iter().map(|(k, v)| (k, json!(v))).collect());
        prop_assert_eq!(sanitize_value(&value), value);
    }

    #[test]
    fn test_sanitize_is_idempotent(value in any_json()) {
        let once = sanitize_value(&value);
        prop_assert_eq!(sanitize_value(&once), once.clone());
    }

    #[test]
    fn test_merge_with_empty_overlay_is_identity(value in any_json()) {
        prop_assert_eq!(merge_values(&value, &json!({})), if value.is_object() { value.clone() } else { json!({}) });
    }

    #[test]
    fn test_config_max_logs_roundtrip(max_logs in any::<u32>(), legacy in any::<bool>()) {
        let key = if legacy { "maxlogs" } else { "maxLogs" };
        let config = LoggerConfig::from_value(json!({"name": "App", (key): max_logs})).unwrap();
        prop_assert_eq!(config.max_logs, u64::from(max_logs));
    }
}
