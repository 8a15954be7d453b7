//! Log output destinations

pub mod collection;
pub mod console;
pub mod document_store;
pub mod file;
pub mod mirror;

pub use collection::{sanitize_value, CollectionSink};
pub use console::ConsoleSink;
pub use document_store::{Document, DocumentStore, MemoryCollection};
pub use file::FileSink;
pub use mirror::MirrorSink;
