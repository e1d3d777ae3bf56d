//! Word document extraction via docx-rs

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::{Error, Result};
use crate::types::{FileItem, PageText};

use super::registry::{Extraction, Strategy};

/// Word strategy: paragraph-level text, paragraph order preserved, styling
/// discarded
pub struct DocxStrategy;

impl DocxStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for DocxStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        let doc = docx_rs::read_docx(&item.bytes)
            .map_err(|e| Error::corrupt(&item.name, e.to_string()))?;

        let mut text = String::new();
        for child in doc.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text.push('\n');
            }
        }

        // docx has no page concept before layout; the document is one page
        Ok(Extraction {
            pages: vec![PageText {
                page_number: 1,
                text: text.trim_end().to_string(),
            }],
            tables: Vec::new(),
            images: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_corrupt_input() {
        let item = FileItem::new("broken.docx", b"not a zip container".to_vec());
        let err = DocxStrategy::new().extract(&item).unwrap_err();
        assert!(matches!(err, Error::CorruptInput { .. }));
    }

    #[test]
    fn test_paragraphs_extract_in_order() {
        let docx = docx_rs::Docx::new()
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("First paragraph")),
            )
            .add_paragraph(
                docx_rs::Paragraph::new()
                    .add_run(docx_rs::Run::new().add_text("Second paragraph")),
            );
        let mut bytes = Vec::new();
        docx.build()
            .pack(&mut std::io::Cursor::new(&mut bytes))
            .unwrap();

        let item = FileItem::new("letter.docx", bytes);
        let extraction = DocxStrategy::new().extract(&item).unwrap();

        assert_eq!(extraction.pages.len(), 1);
        let text = &extraction.pages[0].text;
        let first = text.find("First paragraph").unwrap();
        let second = text.find("Second paragraph").unwrap();
        assert!(first < second);
    }
}
