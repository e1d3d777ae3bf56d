//! Document store statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::Result;
use crate::server::state::AppState;
use crate::sink::SavedDocument;

/// How many recent saves to report
const RECENT_LIMIT: usize = 10;

/// Response for GET /api/store/stats
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub saved_documents: u64,
    pub recent: Vec<SavedDocument>,
}

/// GET /api/store/stats - Saved document count and recent filenames
pub async fn store_stats(State(state): State<AppState>) -> Result<Json<StoreStats>> {
    Ok(Json(StoreStats {
        saved_documents: state.store().count()?,
        recent: state.store().recent(RECENT_LIMIT)?,
    }))
}
