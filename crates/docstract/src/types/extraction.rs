//! Normalized extraction results

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::types::FileKind;

/// Text recovered from a single page
///
/// Page numbering is 1-based and contiguous within one source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Text content of the page
    pub text: String,
}

/// A rectangular table of string cells, associated to a page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    /// Page (or sheet) number the table came from
    pub page_number: u32,
    /// Rows of cells; no type coercion beyond string
    pub rows: Vec<Vec<String>>,
}

/// An embedded raster image copied out of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlob {
    /// Page number the image was embedded on
    pub page_number: u32,
    /// Image bytes, copied out of the source document
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,
    /// Encoded format hint ("jpeg" or "raw")
    pub format: String,
}

/// Structured fields derived from extracted text by pattern search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DerivedFields {
    /// Email-like tokens
    pub emails: Vec<String>,
    /// Phone-like tokens
    pub phones: Vec<String>,
}

impl DerivedFields {
    /// True when no field matched
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Classification of a per-item extraction failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Unknown extension
    UnsupportedFormat,
    /// Extractor failed on a recognized format
    CorruptInput,
    /// OCR/rasterization collaborator missing
    ExtractorUnavailable,
}

/// A non-fatal per-item failure, carried on the result instead of aborting
/// the batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionFailure {
    /// Failure classification
    pub kind: FailureKind,
    /// Human-readable message
    pub message: String,
}

impl ExtractionFailure {
    /// Classify a pipeline error into a per-item failure
    pub fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            Error::ExtractorUnavailable(_) => FailureKind::ExtractorUnavailable,
            _ => FailureKind::CorruptInput,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// The normalized output of extracting one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Source filename
    pub source_name: String,
    /// Detected file kind
    pub kind: FileKind,
    /// Per-page text in page order
    pub pages: Vec<PageText>,
    /// Tables recovered from the document
    pub tables: Vec<Table>,
    /// Embedded images copied out of the document
    pub images: Vec<ImageBlob>,
    /// Pattern-derived structured fields
    pub derived: DerivedFields,
    /// Hash of the combined text
    pub content_hash: String,
    /// Human approval flag; gates export
    pub approved: bool,
    /// Set when extraction failed; pages are empty in that case
    pub error: Option<ExtractionFailure>,
    /// Extraction timestamp
    pub extracted_at: chrono::DateTime<chrono::Utc>,
}

impl ExtractionResult {
    /// Create a successful result from extracted content
    pub fn success(
        source_name: impl Into<String>,
        kind: FileKind,
        pages: Vec<PageText>,
        tables: Vec<Table>,
        images: Vec<ImageBlob>,
    ) -> Self {
        let mut result = Self {
            source_name: source_name.into(),
            kind,
            pages,
            tables,
            images,
            derived: DerivedFields::default(),
            content_hash: String::new(),
            approved: false,
            error: None,
            extracted_at: chrono::Utc::now(),
        };
        result.content_hash = hash_content(&result.combined_text());
        result
    }

    /// Create a failed result; the batch keeps going
    pub fn failure(source_name: impl Into<String>, kind: FileKind, err: &Error) -> Self {
        Self {
            source_name: source_name.into(),
            kind,
            pages: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            derived: DerivedFields::default(),
            content_hash: String::new(),
            approved: false,
            error: Some(ExtractionFailure::from_error(err)),
            extracted_at: chrono::Utc::now(),
        }
    }

    /// True when extraction completed without error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Combined text of all pages, with page separators for multi-page sources
    pub fn combined_text(&self) -> String {
        if self.pages.len() == 1 {
            return self.pages[0].text.clone();
        }
        self.pages
            .iter()
            .map(|p| format!("--- Page {} ---\n{}", p.page_number, p.text.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total characters across all pages
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.text.len()).sum()
    }
}

/// SHA-256 hex digest of extracted content
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_single_page() {
        let result = ExtractionResult::success(
            "notes.txt",
            FileKind::PlainText,
            vec![PageText {
                page_number: 1,
                text: "hello".to_string(),
            }],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(result.combined_text(), "hello");
    }

    #[test]
    fn test_combined_text_multi_page_has_separators() {
        let result = ExtractionResult::success(
            "scan.pdf",
            FileKind::Pdf,
            vec![
                PageText {
                    page_number: 1,
                    text: "first".to_string(),
                },
                PageText {
                    page_number: 2,
                    text: "second".to_string(),
                },
            ],
            Vec::new(),
            Vec::new(),
        );
        let text = result.combined_text();
        assert!(text.contains("--- Page 1 ---"));
        assert!(text.contains("--- Page 2 ---"));
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_failure_carries_kind() {
        let err = Error::corrupt("bad.pdf", "not a PDF");
        let result = ExtractionResult::failure("bad.pdf", FileKind::Pdf, &err);
        assert!(!result.is_success());
        assert_eq!(result.error.as_ref().unwrap().kind, FailureKind::CorruptInput);
        assert!(result.pages.is_empty());
    }

    #[test]
    fn test_content_hash_is_stable() {
        let make = || {
            ExtractionResult::success(
                "notes.txt",
                FileKind::PlainText,
                vec![PageText {
                    page_number: 1,
                    text: "same text".to_string(),
                }],
                Vec::new(),
                Vec::new(),
            )
        };
        assert_eq!(make().content_hash, make().content_hash);
    }
}
