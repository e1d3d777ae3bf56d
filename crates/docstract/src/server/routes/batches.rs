//! Batch inspection, approval, export, and persistence endpoints

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::sink::{json_attachment, zip_attachment, DocumentSink};
use crate::types::{ApproveRequest, BatchSummary, ItemSummary};

/// Full view of one batch
#[derive(Debug, Serialize)]
pub struct BatchDetail {
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub items: Vec<ItemSummary>,
}

/// GET /api/batches - List all batches
pub async fn list_batches(State(state): State<AppState>) -> Json<Vec<BatchSummary>> {
    Json(state.list_batches())
}

/// GET /api/batches/:id - Inspect one batch
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BatchDetail>> {
    let batch = state.get_batch(id)?;
    let items = batch
        .results
        .iter()
        .enumerate()
        .map(|(index, result)| ItemSummary::from_result(index, result))
        .collect();

    Ok(Json(BatchDetail {
        summary: (&batch).into(),
        items,
    }))
}

/// POST /api/batches/:id/items/:index/approve - Approve or decline one item
pub async fn approve_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<ItemSummary>> {
    let summary = state.approve_item(id, index, request.approved)?;
    tracing::info!(
        "Item {} in batch {} {}",
        index,
        id,
        if request.approved { "approved" } else { "declined" }
    );
    Ok(Json(summary))
}

/// GET /api/batches/:id/items/:index/download - Download one item as JSON
pub async fn download_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Response> {
    let batch = state.get_batch(id)?;
    let json = batch.export_item(index, state.include_derived())?;

    let stem = std::path::Path::new(&batch.get(index)?.source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();

    Ok(json_attachment(&format!("{}.json", stem), json))
}

/// GET /api/batches/:id/download - Download approved items as a ZIP
pub async fn download_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let batch = state.get_batch(id)?;
    let archive = batch.export_approved(state.include_derived())?;
    Ok(zip_attachment(&format!("batch-{}.zip", id), archive))
}

/// Response for the save endpoint
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
    pub filename: String,
}

/// POST /api/batches/:id/items/:index/save - Persist one item
pub async fn save_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SaveResponse>> {
    let batch = state.get_batch(id)?;
    let result = batch.get(index)?;

    state
        .store()
        .persist(&result.source_name, &result.combined_text())?;
    tracing::info!("Saved {} to the document store", result.source_name);

    Ok(Json(SaveResponse {
        saved: true,
        filename: result.source_name.clone(),
    }))
}
