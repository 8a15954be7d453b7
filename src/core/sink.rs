//! Sink trait for log output destinations

use super::{config::RetentionPolicy, error::Result, log_record::LogRecord};
use async_trait::async_trait;

/// A physical destination for log records
///
/// A [`Logger`](super::Logger) owns exactly one sink. Retention is split in
/// two steps: [`needs_eviction`](Sink::needs_eviction) is asked before a
/// record is written, and if it said yes, [`evict_oldest`](Sink::evict_oldest)
/// runs after that record has landed.
///
/// # Example
///
/// ```no_run
/// use sink_logger::core::{LogRecord, Result, Sink};
/// use async_trait::async_trait;
///
/// struct NullSink;
///
/// #[async_trait]
/// impl Sink for NullSink {
///     async fn write(&mut self, _record: &LogRecord) -> Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "null"
///     }
/// }
/// ```
#[async_trait]
pub trait Sink: Send {
    /// Persist one record; the record's level selects the channel
    async fn write(&mut self, record: &LogRecord) -> Result<()>;

    /// Whether structured payloads can be stored without stringifying them
    fn accepts_structured(&self) -> bool {
        false
    }

    /// Decide, from the state before the next write, whether the oldest
    /// retained record has to go
    async fn needs_eviction(&mut self, _policy: &RetentionPolicy) -> Result<bool> {
        Ok(false)
    }

    /// Remove exactly one oldest record
    async fn evict_oldest(&mut self) -> Result<()> {
        Ok(())
    }

    /// Remove every retained record
    async fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flush buffered output
    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get the sink name
    fn name(&self) -> &str;
}

#[async_trait]
impl<S: Sink + ?Sized> Sink for Box<S> {
    async fn write(&mut self, record: &LogRecord) -> Result<()> {
        (**self).write(record).await
    }

    fn accepts_structured(&self) -> bool {
        (**self).accepts_structured()
    }

    async fn needs_eviction(&mut self, policy: &RetentionPolicy) -> Result<bool> {
        (**self).needs_eviction(policy).await
    }

    async fn evict_oldest(&mut self) -> Result<()> {
        (**self).evict_oldest().await
    }

    async fn clear(&mut self) -> Result<()> {
        (**self).clear().await
    }

    async fn flush(&mut self) -> Result<()> {
        (**self).flush().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
