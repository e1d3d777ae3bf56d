//! Upload and extraction endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use std::time::Instant;

use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ExtractResponse, ItemError, ItemSummary};

/// POST /api/extract - Upload and process files
///
/// Every file field is processed into one batch, in upload order; ZIP
/// uploads are expanded first. Per-item failures are carried on the batch,
/// unreadable uploads land in `errors`; the request itself only fails on a
/// malformed multipart body.
pub async fn extract_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let start = Instant::now();
    let mut uploads: Vec<(String, Bytes)> = Vec::new();
    let mut errors: Vec<ItemError> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            // Non-file fields (form metadata) are ignored
            continue;
        };

        match field.bytes().await {
            Ok(data) => {
                tracing::info!("Received file: {} ({} bytes)", filename, data.len());
                uploads.push((filename, data));
            }
            Err(e) => {
                errors.push(ItemError {
                    filename,
                    error: format!("Failed to read file: {}", e),
                });
            }
        }
    }

    // Extraction shells out to OCR and may take seconds per page; keep it
    // off the async runtime threads
    let worker_state = state.clone();
    let (batch, mut upload_errors) =
        tokio::task::spawn_blocking(move || process_uploads(&worker_state, uploads))
            .await
            .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))?;
    errors.append(&mut upload_errors);

    let items: Vec<ItemSummary> = batch
        .results
        .iter()
        .enumerate()
        .map(|(index, result)| ItemSummary::from_result(index, result))
        .collect();

    let response = ExtractResponse {
        batch_id: batch.id,
        items,
        errors,
        processing_time_ms: start.elapsed().as_millis() as u64,
    };

    state.add_batch(batch);
    Ok(Json(response))
}

/// Run every upload through the pipeline, merging into one batch
fn process_uploads(state: &AppState, uploads: Vec<(String, Bytes)>) -> (Batch, Vec<ItemError>) {
    let mut batch = Batch::new();
    let mut errors = Vec::new();

    for (filename, data) in uploads {
        match state.pipeline().run_batch(&filename, data.to_vec()) {
            Ok(outcome) => {
                for result in outcome.batch.results {
                    batch.add(result);
                }
                for skipped in outcome.skipped {
                    errors.push(ItemError {
                        filename: skipped.name,
                        error: skipped.reason,
                    });
                }
            }
            Err(e) => {
                tracing::warn!("Upload {} rejected: {}", filename, e);
                errors.push(ItemError {
                    filename,
                    error: e.to_string(),
                });
            }
        }
    }

    (batch, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::testing::mock_state;
    use std::io::Write;

    #[test]
    fn test_zip_upload_merges_into_one_batch() {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("a.txt", options).unwrap();
        writer.write_all(b"alpha").unwrap();
        writer.start_file("inner.zip", options).unwrap();
        writer.write_all(b"PK").unwrap();
        let archive = writer.finish().unwrap().into_inner();

        let state = mock_state();
        let (batch, errors) = process_uploads(
            &state,
            vec![
                ("bundle.zip".to_string(), Bytes::from(archive)),
                ("b.txt".to_string(), Bytes::from_static(b"beta")),
            ],
        );

        // One batch across both uploads, archive entries first
        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.results[0].source_name, "a.txt");
        assert_eq!(batch.results[1].source_name, "b.txt");
        // Nested archive surfaced as a per-entry error, not a failure
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].filename, "inner.zip");
    }

    #[test]
    fn test_unreadable_archive_becomes_an_error_entry() {
        let state = mock_state();
        let (batch, errors) =
            process_uploads(&state, vec![("bad.zip".to_string(), Bytes::from_static(b"nope"))]);
        assert!(batch.results.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].filename, "bad.zip");
    }
}
