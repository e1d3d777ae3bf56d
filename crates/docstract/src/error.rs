//! Error types for the extraction service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Extraction service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File extension is not in the supported set
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A recognized format failed to parse
    #[error("Corrupt input in '{filename}': {message}")]
    CorruptInput { filename: String, message: String },

    /// An OCR/rasterization collaborator is missing or failed to start
    #[error("Extractor unavailable: {0}")]
    ExtractorUnavailable(String),

    /// Document store write failed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Batch not found
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// Item index outside the batch
    #[error("Item index {index} out of range (batch has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a corrupt input error
    pub fn corrupt(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptInput {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an extractor unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ExtractorUnavailable(message.into())
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::UnsupportedFormat(name) => (
                StatusCode::BAD_REQUEST,
                "unsupported_format",
                format!("Unsupported file format: {}", name),
            ),
            Error::CorruptInput { filename, message } => (
                StatusCode::BAD_REQUEST,
                "corrupt_input",
                format!("Corrupt input in '{}': {}", filename, message),
            ),
            Error::ExtractorUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "extractor_unavailable",
                msg.clone(),
            ),
            Error::Persistence(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_error",
                msg.clone(),
            ),
            Error::BatchNotFound(id) => (
                StatusCode::NOT_FOUND,
                "batch_not_found",
                format!("Batch not found: {}", id),
            ),
            Error::ItemOutOfRange { .. } => {
                (StatusCode::NOT_FOUND, "item_out_of_range", self.to_string())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
