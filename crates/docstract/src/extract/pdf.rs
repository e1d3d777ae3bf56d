//! PDF extraction: embedded text with OCR fallback, plus per-page table and
//! image recovery

use std::sync::Arc;

use lopdf::{Document, Object, ObjectId};
use regex::Regex;

use crate::config::{OcrConfig, OcrPolicy};
use crate::error::{Error, Result};
use crate::ocr::{PageImage, PageRasterizer, TextRecognizer};
use crate::types::{FileItem, ImageBlob, PageText, Table};

use super::registry::{Extraction, Strategy};

/// Quick byte-window scan of a PDF, done before full parsing
///
/// Drives the OCR escalation: encrypted documents are rejected early, and
/// documents that look scanned skip the embedded-text attempts entirely.
#[derive(Debug, Clone, Default)]
pub struct PdfProbe {
    /// Encryption dictionary present
    pub is_encrypted: bool,
    /// Image-heavy with little or no text content
    pub looks_scanned: bool,
    /// Rough page count from /Page markers
    pub estimated_pages: u32,
}

impl PdfProbe {
    /// Scan raw PDF bytes without parsing the document structure
    pub fn scan(data: &[u8]) -> Self {
        if !data.starts_with(b"%PDF-") {
            return Self::default();
        }

        let is_encrypted = data.windows(8).any(|w| w == b"/Encrypt");

        let image_count = data.windows(7).filter(|w| w == b"/Image ").count()
            + data.windows(8).filter(|w| w == b"/XObject").count();

        // BT = Begin Text
        let text_stream_count = data
            .windows(3)
            .filter(|w| *w == b"BT " || *w == b"BT\n" || *w == b"BT\r")
            .count();

        let looks_scanned =
            image_count > 0 && (text_stream_count == 0 || image_count > text_stream_count * 3);

        let estimated_pages = data
            .windows(6)
            .filter(|w| *w == b"/Page " || *w == b"/Page\n" || *w == b"/Page\r")
            .count() as u32;

        Self {
            is_encrypted,
            looks_scanned,
            estimated_pages: estimated_pages.max(1),
        }
    }
}

/// PDF strategy: rasterize-and-OCR with embedded-text shortcuts
///
/// Escalation per document: embedded per-page text via lopdf, whole-document
/// text via pdf-extract when lopdf decodes nothing, then rasterization + OCR
/// for pages still without text. `OcrPolicy::Always` skips the embedded
/// attempts and OCRs every page.
pub struct RasterOcrStrategy {
    recognizer: Arc<dyn TextRecognizer>,
    rasterizer: Arc<dyn PageRasterizer>,
    config: OcrConfig,
    column_split: Regex,
}

impl RasterOcrStrategy {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
        config: OcrConfig,
    ) -> Self {
        let column_split = Regex::new(r"[ \t]{2,}").expect("column pattern is valid");
        Self {
            recognizer,
            rasterizer,
            config,
            column_split,
        }
    }

    /// OCR one rendered page, joining recognized lines in reading order
    fn ocr_page(&self, rendered: &[PageImage], page_number: u32) -> Result<String> {
        match rendered.get(page_number as usize - 1) {
            Some(image) => Ok(self.recognizer.read_text(&image.data)?.join("\n")),
            // Rasterizer produced fewer pages than the document reports
            None => Ok(String::new()),
        }
    }

    /// Capture table-like runs of multi-column lines
    ///
    /// Consecutive lines that split into two or more cells on runs of
    /// whitespace are treated as one table. Heuristic, text-layout based.
    fn detect_tables(&self, text: &str, page_number: u32) -> Vec<Table> {
        let mut tables = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for line in text.lines() {
            let cells: Vec<String> = self
                .column_split
                .split(line.trim())
                .map(|c| c.to_string())
                .filter(|c| !c.is_empty())
                .collect();

            if cells.len() >= 2 {
                rows.push(cells);
            } else {
                if rows.len() >= 2 {
                    tables.push(Table {
                        page_number,
                        rows: std::mem::take(&mut rows),
                    });
                }
                rows.clear();
            }
        }
        if rows.len() >= 2 {
            tables.push(Table { page_number, rows });
        }

        tables
    }
}

impl Strategy for RasterOcrStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        let probe = PdfProbe::scan(&item.bytes);
        if probe.is_encrypted {
            return Err(Error::corrupt(&item.name, "PDF is encrypted"));
        }

        let doc = Document::load_mem(&item.bytes)
            .map_err(|e| Error::corrupt(&item.name, e.to_string()))?;
        let page_map = doc.get_pages();

        let use_embedded =
            self.config.policy == OcrPolicy::WhenTextMissing && !probe.looks_scanned;

        // Pass 1: machine-encoded text per page
        let mut page_texts: Vec<(u32, ObjectId, String)> = page_map
            .iter()
            .map(|(page_number, page_id)| {
                let embedded = if use_embedded {
                    doc.extract_text(&[*page_number]).unwrap_or_default()
                } else {
                    String::new()
                };
                (*page_number, *page_id, embedded.trim().to_string())
            })
            .collect();

        // Pass 2: lopdf found nothing anywhere; pdf-extract handles some
        // font encodings lopdf cannot decode. Pages are separated by \f.
        if use_embedded && page_texts.iter().all(|(_, _, t)| t.is_empty()) {
            if let Ok(full) = pdf_extract::extract_text_from_mem(&item.bytes) {
                let mut segments = full.split('\u{c}');
                for (_, _, text) in page_texts.iter_mut() {
                    if let Some(segment) = segments.next() {
                        *text = segment.trim().to_string();
                    }
                }
            }
        }

        // Pass 3: rasterize once and OCR the pages still empty
        let mut rendered: Option<Vec<PageImage>> = None;
        let mut pages = Vec::with_capacity(page_texts.len());
        let mut tables = Vec::new();
        let mut images = Vec::new();

        for (page_number, page_id, mut text) in page_texts {
            if text.is_empty() {
                if rendered.is_none() {
                    rendered = Some(self.rasterizer.rasterize(&item.bytes, self.config.dpi)?);
                }
                text = self.ocr_page(rendered.as_deref().unwrap_or(&[]), page_number)?;
            }

            tables.extend(self.detect_tables(&text, page_number));
            images.extend(embedded_page_images(&doc, page_id, page_number));
            pages.push(PageText { page_number, text });
        }

        Ok(Extraction {
            pages,
            tables,
            images,
        })
    }
}

/// Copy embedded raster images out of one page's XObject resources
fn embedded_page_images(doc: &Document, page_id: ObjectId, page_number: u32) -> Vec<ImageBlob> {
    let mut blobs = Vec::new();

    let Ok(page) = doc.get_dictionary(page_id) else {
        return blobs;
    };
    let Ok(resources) = page.get(b"Resources") else {
        return blobs;
    };
    let resources = match resources {
        Object::Reference(id) => match doc.get_dictionary(*id) {
            Ok(dict) => dict,
            Err(_) => return blobs,
        },
        Object::Dictionary(dict) => dict,
        _ => return blobs,
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return blobs;
    };
    let xobjects = match xobjects {
        Object::Reference(id) => match doc.get_dictionary(*id) {
            Ok(dict) => dict,
            Err(_) => return blobs,
        },
        Object::Dictionary(dict) => dict,
        _ => return blobs,
    };

    for (_name, value) in xobjects.iter() {
        let Ok(id) = value.as_reference() else {
            continue;
        };
        let Ok(Object::Stream(stream)) = doc.get_object(id) else {
            continue;
        };

        let is_image = matches!(
            stream.dict.get(b"Subtype"),
            Ok(Object::Name(name)) if name.as_slice() == b"Image"
        );
        if !is_image {
            continue;
        }

        let format = match stream.dict.get(b"Filter") {
            Ok(Object::Name(name)) if name.as_slice() == b"DCTDecode" => "jpeg",
            _ => "raw",
        };

        blobs.push(ImageBlob {
            page_number,
            data: stream.content.clone(),
            format: format.to_string(),
        });
    }

    blobs
}
