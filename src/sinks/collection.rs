//! Document collection sink
//!
//! Each record becomes one document `{name, level, text, context, timestamp}`
//! where `level` is the three-letter code and absent fields are `null`.
//! Structured text is sanitized before insert: document databases reject
//! keys containing `$` or `.`, and identifier wrappers such as
//! `{"$oid": "..."}` are stored as their plain string.

use super::document_store::{Document, DocumentStore};
use crate::core::{LogRecord, Result, RetentionPolicy, RecordText, Sink};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::Level;

const OPAQUE_ID_KEYS: [&str; 2] = ["$oid", "$uuid"];

/// Deep-clone `value` with `$` and `.` removed from every object key and
/// opaque identifier wrappers replaced by their string form
///
/// When two keys collapse to the same stripped key, the later one wins.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sink_logger::sinks::sanitize_value;
///
/// let clean = sanitize_value(&json!({"$set": {"a.b": 1}, "_id": {"$oid": "5d1a"}}));
/// assert_eq!(clean, json!({"set": {"ab": 1}, "_id": "5d1a"}));
/// ```
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(id) = opaque_id(map) {
                return Value::String(id.to_string());
            }
            let mut clean = Map::with_capacity(map.len());
            for (key, inner) in map {
                clean.insert(sanitize_key(key), sanitize_value(inner));
            }
            Value::Object(clean)
        }
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        other => other.clone(),
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars().filter(|c| *c != '$' && *c != '.').collect()
}

fn opaque_id(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    if OPAQUE_ID_KEYS.contains(&key.as_str()) {
        value.as_str()
    } else {
        None
    }
}

/// Sink inserting one document per record into a [`DocumentStore`]
///
/// The retained document count is fetched from the store on first use and
/// then maintained locally.
pub struct CollectionSink<S: DocumentStore> {
    store: S,
    cached_count: Option<u64>,
}

impl<S: DocumentStore> CollectionSink<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cached_count: None,
        }
    }

    /// Build the document stored for `record`
    pub fn to_document(record: &LogRecord) -> Document {
        let text = match record.text() {
            RecordText::Text(text) => Value::String(text.clone()),
            RecordText::Structured(value) => sanitize_value(value),
        };

        let mut document = Document::new();
        document.insert("name".to_string(), Value::String(record.name().to_string()));
        document.insert("level".to_string(), Value::String(record.level().code().to_string()));
        document.insert("text".to_string(), text);
        document.insert(
            "context".to_string(),
            record.context().map_or(Value::Null, |c| Value::String(c.to_string())),
        );
        document.insert(
            "timestamp".to_string(),
            record.timestamp().map_or(Value::Null, |t| Value::String(t.to_string())),
        );
        document
    }

    /// Number of documents currently retained
    pub async fn count(&mut self) -> Result<u64> {
        match self.cached_count {
            Some(count) => Ok(count),
            None => {
                let count = self.store.count_documents(&Document::new()).await?;
                self.cached_count = Some(count);
                Ok(count)
            }
        }
    }

    /// Remove the oldest document, returning whether one existed
    pub async fn delete_first(&mut self) -> Result<bool> {
        let removed = self.store.delete_one(&Document::new()).await?;
        if removed {
            if let Some(count) = self.cached_count.as_mut() {
                *count = count.saturating_sub(1);
            }
        }
        Ok(removed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: DocumentStore> Sink for CollectionSink<S> {
    async fn write(&mut self, record: &LogRecord) -> Result<()> {
        self.store.insert_one(Self::to_document(record)).await?;
        if let Some(count) = self.cached_count.as_mut() {
            *count += 1;
        }
        Ok(())
    }

    fn accepts_structured(&self) -> bool {
        true
    }

    async fn needs_eviction(&mut self, policy: &RetentionPolicy) -> Result<bool> {
        if policy.max_logs == 0 {
            return Ok(false);
        }
        let count = self.count().await?;
        Ok(policy.count_exceeded(count))
    }

    async fn evict_oldest(&mut self) -> Result<()> {
        self.delete_first().await?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        let removed = self.store.delete_many(&Document::new()).await?;
        self.cached_count = Some(0);
        tracing::event!(Level::DEBUG, removed, "cleared log collection");
        Ok(())
    }

    fn name(&self) -> &str {
        "collection"
    }
}
