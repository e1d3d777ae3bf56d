//! Uploaded file items and type classification

use serde::{Deserialize, Serialize};

/// Supported file kinds, detected from the filename extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document (rasterized and OCR'd, or embedded text)
    Pdf,
    /// Raster image (OCR'd directly)
    Image,
    /// Word document (.docx)
    Word,
    /// Excel spreadsheet (.xlsx, .xls)
    Excel,
    /// CSV file
    Csv,
    /// Plain text file
    PlainText,
    /// Anything else
    Unsupported,
}

impl FileKind {
    /// Detect the file kind from a filename, case-insensitive
    pub fn from_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" => Self::Image,
            "docx" => Self::Word,
            "xlsx" | "xls" => Self::Excel,
            "csv" => Self::Csv,
            "txt" => Self::PlainText,
            _ => Self::Unsupported,
        }
    }

    /// Check if this kind has an extraction strategy
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Image => "Image",
            Self::Word => "Word Document",
            Self::Excel => "Excel Spreadsheet",
            Self::Csv => "CSV",
            Self::PlainText => "Text File",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Check if a filename names a ZIP archive (expanded before classification)
pub fn is_archive(name: &str) -> bool {
    name.rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// A single file handed to the extraction pipeline
///
/// Created on upload or archive expansion, immutable afterwards. The bytes
/// are owned by the pipeline invocation and dropped with the item.
#[derive(Debug, Clone)]
pub struct FileItem {
    /// Source filename (archive entry name for expanded items)
    pub name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Detected file kind
    pub kind: FileKind,
}

impl FileItem {
    /// Create an item, classifying it from the filename
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let kind = FileKind::from_name(&name);
        Self { name, bytes, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supported_extensions() {
        assert_eq!(FileKind::from_name("report.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("scan.png"), FileKind::Image);
        assert_eq!(FileKind::from_name("photo.jpg"), FileKind::Image);
        assert_eq!(FileKind::from_name("photo.jpeg"), FileKind::Image);
        assert_eq!(FileKind::from_name("letter.docx"), FileKind::Word);
        assert_eq!(FileKind::from_name("sheet.xlsx"), FileKind::Excel);
        assert_eq!(FileKind::from_name("legacy.xls"), FileKind::Excel);
        assert_eq!(FileKind::from_name("data.csv"), FileKind::Csv);
        assert_eq!(FileKind::from_name("notes.txt"), FileKind::PlainText);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(FileKind::from_name("A.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("SCAN.Png"), FileKind::Image);
        assert_eq!(FileKind::from_name("SHEET.XLSX"), FileKind::Excel);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(FileKind::from_name("archive.tar.gz"), FileKind::Unsupported);
        assert_eq!(FileKind::from_name("noextension"), FileKind::Unsupported);
        assert_eq!(FileKind::from_name("binary.exe"), FileKind::Unsupported);
        assert!(!FileKind::from_name("binary.exe").is_supported());
    }

    #[test]
    fn test_archive_detection() {
        assert!(is_archive("bundle.zip"));
        assert!(is_archive("BUNDLE.ZIP"));
        assert!(!is_archive("report.pdf"));
    }
}
