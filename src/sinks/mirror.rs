//! Sink composite that mirrors every record to the console

use super::console::ConsoleSink;
use crate::core::{LogRecord, Result, RetentionPolicy, Sink};
use async_trait::async_trait;
use tracing::Level;

/// Writes to a primary sink and echoes each record to a [`ConsoleSink`]
///
/// Retention and clearing are delegated to the primary only; the console has
/// nothing to evict. A console failure does not undo the primary write.
pub struct MirrorSink<P: Sink> {
    primary: P,
    console: ConsoleSink,
}

impl<P: Sink> MirrorSink<P> {
    pub fn new(primary: P) -> Self {
        Self::with_console(primary, ConsoleSink::new())
    }

    pub fn with_console(primary: P, console: ConsoleSink) -> Self {
        Self { primary, console }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut P {
        &mut self.primary
    }

    pub fn into_primary(self) -> P {
        self.primary
    }
}

#[async_trait]
impl<P: Sink> Sink for MirrorSink<P> {
    async fn write(&mut self, record: &LogRecord) -> Result<()> {
        self.primary.write(record).await?;
        if let Err(e) = self.console.write(record).await {
            tracing::event!(Level::DEBUG, "console mirror failed: {e}");
        }
        Ok(())
    }

    fn accepts_structured(&self) -> bool {
        self.primary.accepts_structured()
    }

    async fn needs_eviction(&mut self, policy: &RetentionPolicy) -> Result<bool> {
        self.primary.needs_eviction(policy).await
    }

    async fn evict_oldest(&mut self) -> Result<()> {
        self.primary.evict_oldest().await
    }

    async fn clear(&mut self) -> Result<()> {
        self.primary.clear().await
    }

    async fn flush(&mut self) -> Result<()> {
        self.primary.flush().await?;
        self.console.flush().await
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
