//! Download responses for exported results

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Serve bytes as a JSON file download
pub fn json_attachment(filename: &str, body: Vec<u8>) -> Response {
    attachment(filename, "application/json", body)
}

/// Serve bytes as a ZIP archive download
pub fn zip_attachment(filename: &str, body: Vec<u8>) -> Response {
    attachment(filename, "application/zip", body)
}

fn attachment(filename: &str, content_type: &str, body: Vec<u8>) -> Response {
    // Quotes around the filename keep spaces in archive entry names intact
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
