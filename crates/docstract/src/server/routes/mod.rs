//! API routes for the extraction server

pub mod batches;
pub mod extract;
pub mod store;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Extraction - with larger body limit for file uploads
        .route(
            "/extract",
            post(extract::extract_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Batch inspection and approval
        .route("/batches", get(batches::list_batches))
        .route("/batches/:id", get(batches::get_batch))
        .route(
            "/batches/:id/items/:index/approve",
            post(batches::approve_item),
        )
        // Export and persistence
        .route(
            "/batches/:id/items/:index/download",
            get(batches::download_item),
        )
        .route("/batches/:id/download", get(batches::download_batch))
        .route("/batches/:id/items/:index/save", post(batches::save_item))
        // Document store
        .route("/store/stats", get(store::store_stats))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "docstract",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Multi-format document text extraction with OCR and approval-gated export",
        "endpoints": {
            "POST /api/extract": "Upload documents (pdf, png, jpg, jpeg, docx, xlsx, xls, csv, txt, or a zip of these)",
            "GET /api/batches": "List processed batches",
            "GET /api/batches/:id": "Inspect one batch",
            "POST /api/batches/:id/items/:index/approve": "Approve or decline one item for export",
            "GET /api/batches/:id/items/:index/download": "Download one item as JSON",
            "GET /api/batches/:id/download": "Download approved items as a ZIP of JSON files",
            "POST /api/batches/:id/items/:index/save": "Save one item to the document store",
            "GET /api/store/stats": "Document store statistics"
        },
        "supported_formats": ["zip", "pdf", "png", "jpg", "jpeg", "docx", "xlsx", "xls", "csv", "txt"]
    }))
}
