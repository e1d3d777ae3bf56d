//! Batch aggregation and approval-gated export

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{Error, Result};
use crate::types::ExtractionResult;

/// JSON document shape for exported and persisted results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportDocument {
    /// Original filename
    pub filename: String,
    /// Combined extracted text
    pub text: String,
    /// Derived email matches, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    /// Derived phone matches, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
}

impl ExportDocument {
    /// Build the export shape for one result
    pub fn from_result(result: &ExtractionResult, include_derived: bool) -> Self {
        let (emails, phones) = if include_derived {
            (
                Some(result.derived.emails.clone()),
                Some(result.derived.phones.clone()),
            )
        } else {
            (None, None)
        };

        Self {
            filename: result.source_name.clone(),
            text: result.combined_text(),
            emails,
            phones,
        }
    }
}

/// An ordered collection of extraction results from one upload action
///
/// Insertion order follows archive iteration order or upload order. Results
/// are appended during processing and only their approval flag changes
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Batch identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Results in insertion order
    pub results: Vec<ExtractionResult>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            results: Vec::new(),
        }
    }

    /// Append a result
    pub fn add(&mut self, result: ExtractionResult) {
        self.results.push(result);
    }

    /// Set the approval flag on one item
    ///
    /// Declining keeps the extraction; it is only excluded from export.
    pub fn approve(&mut self, index: usize, approved: bool) -> Result<()> {
        let len = self.results.len();
        let result = self
            .results
            .get_mut(index)
            .ok_or(Error::ItemOutOfRange { index, len })?;
        result.approved = approved;
        Ok(())
    }

    /// Get one item by index
    pub fn get(&self, index: usize) -> Result<&ExtractionResult> {
        self.results.get(index).ok_or(Error::ItemOutOfRange {
            index,
            len: self.results.len(),
        })
    }

    /// Number of approved items
    pub fn approved_count(&self) -> usize {
        self.results.iter().filter(|r| r.approved).count()
    }

    /// Serialize one item to a JSON document
    pub fn export_item(&self, index: usize, include_derived: bool) -> Result<Vec<u8>> {
        let result = self.get(index)?;
        let doc = ExportDocument::from_result(result, include_derived);
        Ok(serde_json::to_vec_pretty(&doc)?)
    }

    /// Build a ZIP archive with one `<stem>.json` entry per approved result
    ///
    /// Zero approved results produce a valid empty archive, not an error.
    pub fn export_approved(&self, include_derived: bool) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let mut used_stems: HashMap<String, usize> = HashMap::new();

        for result in self.results.iter().filter(|r| r.approved) {
            let stem = Path::new(&result.source_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string();

            // Same stem twice gets a numeric suffix instead of clobbering
            let count = used_stems.entry(stem.clone()).or_insert(0);
            *count += 1;
            let entry_name = if *count == 1 {
                format!("{}.json", stem)
            } else {
                format!("{}-{}.json", stem, count)
            };

            let doc = ExportDocument::from_result(result, include_derived);
            let json = serde_json::to_vec_pretty(&doc)?;

            writer
                .start_file(entry_name, options)
                .map_err(|e| Error::internal(format!("ZIP write failed: {}", e)))?;
            writer.write_all(&json)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::internal(format!("ZIP finalize failed: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileKind, PageText};
    use std::io::Read;

    fn result_with_text(name: &str, text: &str) -> ExtractionResult {
        ExtractionResult::success(
            name,
            FileKind::PlainText,
            vec![PageText {
                page_number: 1,
                text: text.to_string(),
            }],
            Vec::new(),
            Vec::new(),
        )
    }

    fn entry_names(archive_bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_export_includes_only_approved() {
        let mut batch = Batch::new();
        batch.add(result_with_text("first.txt", "one"));
        batch.add(result_with_text("second.txt", "two"));
        batch.add(result_with_text("third.txt", "three"));
        batch.approve(0, true).unwrap();
        batch.approve(1, false).unwrap();
        batch.approve(2, true).unwrap();

        let archive = batch.export_approved(false).unwrap();
        let names = entry_names(&archive);
        assert_eq!(names, vec!["first.json", "third.json"]);
    }

    #[test]
    fn test_export_with_no_approvals_is_empty_archive() {
        let mut batch = Batch::new();
        batch.add(result_with_text("only.txt", "text"));

        let archive = batch.export_approved(false).unwrap();
        let names = entry_names(&archive);
        assert!(names.is_empty());
    }

    #[test]
    fn test_export_round_trips() {
        let mut batch = Batch::new();
        batch.add(result_with_text("report.txt", "body text"));

        let json = batch.export_item(0, false).unwrap();
        let parsed: ExportDocument = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed.filename, "report.txt");
        assert_eq!(parsed.text, "body text");
        assert!(parsed.emails.is_none());

        // Re-serializing parses back to the same document
        let again: ExportDocument =
            serde_json::from_slice(&serde_json::to_vec(&parsed).unwrap()).unwrap();
        assert_eq!(again, parsed);
    }

    #[test]
    fn test_export_duplicate_stems_get_suffixes() {
        let mut batch = Batch::new();
        batch.add(result_with_text("dir-a/report.txt", "a"));
        batch.add(result_with_text("dir-b/report.txt", "b"));
        batch.approve(0, true).unwrap();
        batch.approve(1, true).unwrap();

        let archive = batch.export_approved(false).unwrap();
        let names = entry_names(&archive);
        assert_eq!(names, vec!["report.json", "report-2.json"]);
    }

    #[test]
    fn test_export_entry_content() {
        let mut batch = Batch::new();
        batch.add(result_with_text("notes.txt", "remember the milk"));
        batch.approve(0, true).unwrap();

        let archive = batch.export_approved(false).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut entry = zip.by_name("notes.json").unwrap();
        let mut raw = String::new();
        entry.read_to_string(&mut raw).unwrap();

        let doc: ExportDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.filename, "notes.txt");
        assert_eq!(doc.text, "remember the milk");
    }

    #[test]
    fn test_approve_out_of_range() {
        let mut batch = Batch::new();
        batch.add(result_with_text("only.txt", "text"));
        assert!(batch.approve(5, true).is_err());
    }
}
