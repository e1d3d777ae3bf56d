//! API request/response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::Batch;
use crate::types::extraction::{ExtractionFailure, ExtractionResult};
use crate::types::FileKind;

/// Per-item view returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Index within the batch
    pub index: usize,
    /// Source filename
    pub filename: String,
    /// Detected file kind
    pub kind: FileKind,
    /// Number of pages extracted
    pub pages: usize,
    /// Number of tables extracted
    pub tables: usize,
    /// Number of embedded images extracted
    pub images: usize,
    /// Total extracted characters
    pub chars: usize,
    /// Approval flag
    pub approved: bool,
    /// Failure, if extraction did not succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtractionFailure>,
}

impl ItemSummary {
    /// Build a summary from a result and its batch index
    pub fn from_result(index: usize, result: &ExtractionResult) -> Self {
        Self {
            index,
            filename: result.source_name.clone(),
            kind: result.kind,
            pages: result.pages.len(),
            tables: result.tables.len(),
            images: result.images.len(),
            chars: result.char_count(),
            approved: result.approved,
            error: result.error.clone(),
        }
    }
}

/// A per-entry problem reported alongside a batch (skipped archive entries,
/// unreadable uploads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    /// Filename the problem applies to
    pub filename: String,
    /// What went wrong
    pub error: String,
}

/// Response for POST /api/extract
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Batch identifier for follow-up approval/export calls
    pub batch_id: Uuid,
    /// Per-item summaries in batch order
    pub items: Vec<ItemSummary>,
    /// Entries that were dropped or failed outside extraction
    pub errors: Vec<ItemError>,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
}

/// Batch view for listing endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Batch identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Number of items
    pub items: usize,
    /// Number of approved items
    pub approved: usize,
    /// Number of failed items
    pub failed: usize,
}

impl From<&Batch> for BatchSummary {
    fn from(batch: &Batch) -> Self {
        Self {
            id: batch.id,
            created_at: batch.created_at,
            items: batch.results.len(),
            approved: batch.approved_count(),
            failed: batch.results.iter().filter(|r| !r.is_success()).count(),
        }
    }
}

/// Request body for the approval endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct ApproveRequest {
    /// New approval state; declining keeps the extraction but excludes it
    /// from export
    pub approved: bool,
}
