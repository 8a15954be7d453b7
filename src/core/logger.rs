//! Main logger implementation

use super::{
    config::{LoggerConfig, RetentionPolicy},
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::{LogRecord, RecordText},
    metrics::LoggerMetrics,
    sink::Sink,
    timestamp::TimestampMode,
};
use serde::Serialize;
use serde_json::Value;
use tracing::Level;

/// What a caller hands to [`Logger::log`]
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Wrapped into a record using the logger's configuration
    Text(String),
    /// Stored natively by sinks that can, stringified otherwise
    Structured(Value),
    /// Used as-is
    Record(LogRecord),
}

impl Payload {
    /// Serialize any value into a structured payload
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Payload::Structured(serde_json::to_value(value)?))
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

impl From<LogRecord> for Payload {
    fn from(record: LogRecord) -> Self {
        Payload::Record(record)
    }
}

/// Result of a successful `log` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The record reached the sink
    Logged,
    /// The logger is disabled
    Disabled,
    /// The record's level is below the threshold
    BelowThreshold,
}

impl LogOutcome {
    #[must_use]
    pub fn is_logged(&self) -> bool {
        matches!(self, LogOutcome::Logged)
    }
}

/// A named logger writing to exactly one sink
///
/// The logger is a single writer: every method that touches the sink takes
/// `&mut self`, and each `log` call finishes its retention check, write and
/// eviction before its future resolves. Callers that share a logger across
/// tasks serialize access themselves.
pub struct Logger<S: Sink = Box<dyn Sink>> {
    config: LoggerConfig,
    sink: S,
    metrics: LoggerMetrics,
}

impl<S: Sink> Logger<S> {
    /// Compose a logger from a configuration and a sink
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: LoggerConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink,
            metrics: LoggerMetrics::new(),
        })
    }

    /// Log at the record's own level, or at the current threshold for text
    /// and structured payloads
    pub async fn log(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        let payload = payload.into();
        let level = match &payload {
            Payload::Record(record) => record.level(),
            _ => self.config.level,
        };
        self.dispatch(level, payload).await
    }

    /// Log at an explicit level
    pub async fn log_at(&mut self, level: LogLevel, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.dispatch(level, payload.into()).await
    }

    /// Log at a level given by name
    ///
    /// # Errors
    ///
    /// An unrecognized level name is a configuration error, unless the
    /// logger is disabled, in which case nothing is resolved at all.
    pub async fn log_named(&mut self, level: &str, payload: impl Into<Payload>) -> Result<LogOutcome> {
        let payload = payload.into();
        if !self.config.enabled {
            self.metrics.record_suppressed();
            return Ok(LogOutcome::Disabled);
        }
        let level: LogLevel = level.parse()?;
        self.dispatch(level, payload).await
    }

    #[inline]
    pub async fn verbose(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.log_at(LogLevel::Verbose, payload).await
    }

    #[inline]
    pub async fn debug(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.log_at(LogLevel::Debug, payload).await
    }

    #[inline]
    pub async fn info(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.log_at(LogLevel::Info, payload).await
    }

    #[inline]
    pub async fn warning(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.log_at(LogLevel::Warning, payload).await
    }

    #[inline]
    pub async fn error(&mut self, payload: impl Into<Payload>) -> Result<LogOutcome> {
        self.log_at(LogLevel::Error, payload).await
    }

    async fn dispatch(&mut self, level: LogLevel, payload: Payload) -> Result<LogOutcome> {
        if !self.config.enabled {
            self.metrics.record_suppressed();
            return Ok(LogOutcome::Disabled);
        }
        if level < self.config.level {
            self.metrics.record_suppressed();
            return Ok(LogOutcome::BelowThreshold);
        }

        let record = self.build_record(level, payload)?;
        self.emit(record).await
    }

    fn build_record(&self, level: LogLevel, payload: Payload) -> Result<LogRecord> {
        let record = match payload {
            Payload::Record(record) => record,
            Payload::Text(text) => self.wrap(level, text)?,
            Payload::Structured(value) => self.wrap(level, value)?,
        };

        let stringify = self.config.objects_as_text || !self.sink.accepts_structured();
        if stringify && record.text().is_structured() {
            Ok(record.into_textual())
        } else {
            Ok(record)
        }
    }

    fn wrap(&self, level: LogLevel, text: impl Into<RecordText>) -> Result<LogRecord> {
        Ok(LogRecord::new(self.config.name.clone(), level, text)?
            .with_context(self.config.context.clone())
            .stamped(self.config.timestamp))
    }

    /// Retention check on the pre-write state, write, then the decided eviction
    async fn emit(&mut self, record: LogRecord) -> Result<LogOutcome> {
        let retention = self.config.retention();
        let evict = if retention.is_unbounded() {
            false
        } else {
            self.sink.needs_eviction(&retention).await?
        };

        if let Err(e) = self.sink.write(&record).await {
            self.metrics.record_failed();
            tracing::event!(Level::DEBUG, sink = self.sink.name(), "write failed: {e}");
            return Err(e);
        }
        self.metrics.record_emitted();

        if evict {
            match self.sink.evict_oldest().await {
                Ok(()) => {
                    self.metrics.record_evicted();
                }
                Err(e) => {
                    tracing::event!(
                        Level::WARN,
                        sink = self.sink.name(),
                        "record written but eviction failed: {e}"
                    );
                    return Err(LoggerError::eviction(self.sink.name(), e));
                }
            }
        }

        Ok(LogOutcome::Logged)
    }

    /// Remove every record the sink retains
    pub async fn clear(&mut self) -> Result<()> {
        self.sink.clear().await
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.sink.flush().await
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.config.level = level;
    }

    /// Set the threshold by name
    ///
    /// # Errors
    ///
    /// Unknown names are rejected and the threshold is left unchanged.
    pub fn set_level_named(&mut self, level: &str) -> Result<()> {
        self.config.level = level.parse()?;
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn set_context(&mut self, context: Option<String>) {
        self.config.context = context;
    }

    pub fn set_timestamp(&mut self, timestamp: impl Into<TimestampMode>) {
        self.config.timestamp = timestamp.into();
    }

    pub fn set_retention(&mut self, retention: RetentionPolicy) {
        self.config.max_logs = retention.max_logs;
        self.config.max_size = retention.max_size;
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Release the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use sink_logger::prelude::*;
///
/// let logger = LoggerBuilder::new("App")
///     .level(LogLevel::Debug)
///     .context("Startup")
///     .timestamp(TimestampMode::Disabled)
///     .build(ConsoleSink::new())
///     .unwrap();
///
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: LoggerConfig::new(name),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.config.context = Some(context.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, timestamp: impl Into<TimestampMode>) -> Self {
        self.config.timestamp = timestamp.into();
        self
    }

    /// Keep at most `max_logs` records in a durable sink
    #[must_use = "builder methods return a new value"]
    pub fn max_logs(mut self, max_logs: u64) -> Self {
        self.config.max_logs = max_logs;
        self
    }

    /// Keep a file sink under `max_size` bytes
    #[must_use = "builder methods return a new value"]
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.config.max_size = max_size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn objects_as_text(mut self, objects_as_text: bool) -> Self {
        self.config.objects_as_text = objects_as_text;
        self
    }

    /// Build the Logger around `sink`
    pub fn build<S: Sink>(self, sink: S) -> Result<Logger<S>> {
        Logger::new(self.config, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Default)]
    struct Journal {
        records: Vec<LogRecord>,
        calls: Vec<&'static str>,
    }

    struct RecordingSink {
        journal: Arc<Mutex<Journal>>,
        structured: bool,
        retained: u64,
        fail_writes: bool,
        fail_evictions: bool,
    }

    impl RecordingSink {
        fn new(journal: Arc<Mutex<Journal>>) -> Self {
            Self {
                journal,
                structured: false,
                retained: 0,
                fail_writes: false,
                fail_evictions: false,
            }
        }
    }

    #[async_trait]
    impl Sink for RecordingSink {
        async fn write(&mut self, record: &LogRecord) -> Result<()> {
            let mut journal = self.journal.lock();
            journal.calls.push("write");
            if self.fail_writes {
                return Err(LoggerError::writer("simulated write failure"));
            }
            journal.records.push(record.clone());
            self.retained += 1;
            Ok(())
        }

        fn accepts_structured(&self) -> bool {
            self.structured
        }

        async fn needs_eviction(&mut self, policy: &RetentionPolicy) -> Result<bool> {
            self.journal.lock().calls.push("check");
            Ok(policy.count_exceeded(self.retained))
        }

        async fn evict_oldest(&mut self) -> Result<()> {
            let mut journal = self.journal.lock();
            journal.calls.push("evict");
            if self.fail_evictions {
                return Err(LoggerError::other("simulated eviction failure"));
            }
            journal.records.remove(0);
            self.retained -= 1;
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn quiet_builder() -> LoggerBuilder {
        LoggerBuilder::new("App").timestamp(TimestampMode::Disabled)
    }

    #[tokio::test]
    async fn test_disabled_logger_does_not_write() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .enabled(false)
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        assert_eq!(logger.error("boom").await.unwrap(), LogOutcome::Disabled);
        assert!(journal.lock().calls.is_empty());
        assert_eq!(logger.metrics().suppressed_count(), 1);
    }

    #[tokio::test]
    async fn test_below_threshold_does_not_write() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .level(LogLevel::Info)
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        let outcome = logger.debug("hidden").await.unwrap();
        assert_eq!(outcome, LogOutcome::BelowThreshold);
        assert!(!outcome.is_logged());
        assert!(journal.lock().calls.is_empty());
    }

    #[tokio::test]
    async fn test_log_defaults_to_threshold_level() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .level(LogLevel::Warning)
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        assert!(logger.log("plain").await.unwrap().is_logged());
        assert_eq!(journal.lock().records[0].level(), LogLevel::Warning);
    }

    #[tokio::test]
    async fn test_log_named_resolves_level() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        assert!(logger.log_named("error", "x").await.unwrap().is_logged());
        assert_eq!(journal.lock().records[0].level(), LogLevel::Error);

        let err = logger.log_named("loud", "x").await.unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(journal.lock().records.len(), 1);
    }

    #[tokio::test]
    async fn test_set_level_named_rejects_unknown() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .build(RecordingSink::new(journal))
            .unwrap();

        logger.set_level_named("debug").unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);

        assert!(logger.set_level_named("nope").is_err());
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[tokio::test]
    async fn test_text_wrapped_with_config() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .context("User")
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        logger.info("Test").await.unwrap();

        let journal = journal.lock();
        let record = &journal.records[0];
        assert_eq!(record.name(), "App");
        assert_eq!(record.context(), Some("User"));
        assert_eq!(record.timestamp(), None);
        assert_eq!(crate::core::formatter::format(record), "[INF] [App] [User] Test");
    }

    #[tokio::test]
    async fn test_record_payload_used_as_is() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .context("Ignored")
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        let record = LogRecord::new("Other", LogLevel::Error, "own").unwrap();
        logger.log(record.clone()).await.unwrap();

        assert_eq!(journal.lock().records[0], record);
    }

    #[tokio::test]
    async fn test_structured_payload_routing() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut sink = RecordingSink::new(Arc::clone(&journal));
        sink.structured = true;
        let mut logger = quiet_builder().build(sink).unwrap();

        logger.info(json!({"id": 1})).await.unwrap();
        assert_eq!(
            journal.lock().records[0].text(),
            &RecordText::Structured(json!({"id": 1}))
        );

        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut sink = RecordingSink::new(Arc::clone(&journal));
        sink.structured = true;
        let mut logger = quiet_builder().objects_as_text(true).build(sink).unwrap();

        logger.info(json!({"id": 1})).await.unwrap();
        assert_eq!(
            journal.lock().records[0].text(),
            &RecordText::Text(r#"{"id":1}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_structured_payload_stringified_for_textual_sink() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        let payload = Payload::structured(&vec![1, 2, 3]).unwrap();
        logger.info(payload).await.unwrap();
        assert_eq!(
            journal.lock().records[0].text(),
            &RecordText::Text("[1,2,3]".to_string())
        );
    }

    #[tokio::test]
    async fn test_check_write_evict_ordering() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .max_logs(2)
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        for i in 0..3 {
            logger.info(format!("m{}", i)).await.unwrap();
        }

        let journal = journal.lock();
        assert_eq!(
            journal.calls,
            vec!["check", "write", "check", "write", "check", "write", "evict"]
        );
        let texts: Vec<String> = journal.records.iter().map(|r| r.text().to_text()).collect();
        assert_eq!(texts, vec!["m1", "m2"]);
        assert_eq!(logger.metrics().evicted_count(), 1);
    }

    #[tokio::test]
    async fn test_unbounded_skips_retention_check() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut logger = quiet_builder()
            .build(RecordingSink::new(Arc::clone(&journal)))
            .unwrap();

        logger.info("a").await.unwrap();
        assert_eq!(journal.lock().calls, vec!["write"]);
    }

    #[tokio::test]
    async fn test_eviction_failure_keeps_written_record() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut sink = RecordingSink::new(Arc::clone(&journal));
        sink.fail_evictions = true;
        let mut logger = quiet_builder().max_logs(1).build(sink).unwrap();

        logger.info("first").await.unwrap();
        let err = logger.info("second").await.unwrap_err();

        assert!(err.record_was_written());
        assert_eq!(journal.lock().records.len(), 2);
        assert_eq!(logger.metrics().emitted_count(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_is_propagated() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let mut sink = RecordingSink::new(Arc::clone(&journal));
        sink.fail_writes = true;
        let mut logger = quiet_builder().build(sink).unwrap();

        for _ in 0..3 {
            assert!(logger.info("x").await.is_err());
        }
        assert_eq!(logger.metrics().failed_count(), 3);
        assert_eq!(logger.metrics().emitted_count(), 0);
    }

    #[test]
    fn test_empty_name_rejected() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let err = LoggerBuilder::new("").build(RecordingSink::new(journal)).err();
        assert!(err.map(|e| e.is_configuration()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_boxed_sink() {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let sink: Box<dyn Sink> = Box::new(RecordingSink::new(Arc::clone(&journal)));
        let mut logger: Logger = quiet_builder().build(sink).unwrap();

        logger.warning("boxed").await.unwrap();
        assert_eq!(logger.sink().name(), "recording");
        assert_eq!(journal.lock().records.len(), 1);
    }
}
