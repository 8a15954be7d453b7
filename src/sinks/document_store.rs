//! Document store seam used by the collection sink

use crate::core::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A stored document: a JSON object
pub type Document = Map<String, Value>;

/// Minimal collection interface of a document database
///
/// Filters are documents matched by field equality; an empty filter matches
/// every document. Which document `delete_one` and `find_one` pick among
/// several matches is the store's natural order. Backend failures are
/// reported as [`LoggerError::store`](crate::core::LoggerError::store).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, document: Document) -> Result<()>;

    /// Delete the first matching document; returns whether one was removed
    async fn delete_one(&self, filter: &Document) -> Result<bool>;

    /// Delete every matching document; returns how many were removed
    async fn delete_many(&self, filter: &Document) -> Result<u64>;

    async fn count_documents(&self, filter: &Document) -> Result<u64>;

    async fn find_one(&self, filter: &Document) -> Result<Option<Document>>;
}

/// In-memory, insertion-ordered [`DocumentStore`]
///
/// Clones share the same underlying collection, so a test can keep a handle
/// while the sink owns another.
///
/// # Example
///
/// ```
/// use sink_logger::sinks::{Document, DocumentStore, MemoryCollection};
///
/// # async fn example() -> sink_logger::Result<()> {
/// let collection = MemoryCollection::new();
/// let mut doc = Document::new();
/// doc.insert("name".into(), "App".into());
/// collection.insert_one(doc).await?;
///
/// assert_eq!(collection.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored document, oldest first
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryCollection {
    async fn insert_one(&self, document: Document) -> Result<()> {
        self.documents.lock().push(document);
        Ok(())
    }

    async fn delete_one(&self, filter: &Document) -> Result<bool> {
        let mut documents = self.documents.lock();
        match documents.iter().position(|doc| matches(doc, filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_many(&self, filter: &Document) -> Result<u64> {
        let mut documents = self.documents.lock();
        let before = documents.len();
        documents.retain(|doc| !matches(doc, filter));
        Ok((before - documents.len()) as u64)
    }

    async fn count_documents(&self, filter: &Document) -> Result<u64> {
        let documents = self.documents.lock();
        Ok(documents.iter().filter(|doc| matches(doc, filter)).count() as u64)
    }

    async fn find_one(&self, filter: &Document) -> Result<Option<Document>> {
        let documents = self.documents.lock();
        Ok(documents.iter().find(|doc| matches(doc, filter)).cloned())
    }
}
