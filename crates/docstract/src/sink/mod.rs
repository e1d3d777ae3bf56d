//! Persistence and export sinks for extraction results

mod download;
mod sqlite;

pub use download::{json_attachment, zip_attachment};
pub use sqlite::{SavedDocument, SqliteStore};

use crate::error::Result;

/// Writes one extracted document to a persistent store
///
/// Every save is an insert; the sink does not deduplicate or update, so
/// saving the same filename twice produces two rows.
pub trait DocumentSink: Send + Sync {
    /// Persist a `{filename, content}` document
    fn persist(&self, filename: &str, content: &str) -> Result<()>;
}
