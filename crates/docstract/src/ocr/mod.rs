//! OCR and rasterization collaborators
//!
//! Text recognition and PDF rasterization are external capabilities, not
//! reimplemented here. The default engines shell out to tesseract and
//! pdftoppm (poppler-utils); both are probed once at startup and injected
//! into the pipeline as read-only handles.

mod raster;
mod tesseract;

pub use raster::PdftoppmRasterizer;
pub use tesseract::TesseractOcr;

use crate::error::Result;

/// A rendered page image produced by rasterization
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Page number (1-indexed, contiguous)
    pub page_number: u32,
    /// PNG-encoded pixels
    pub data: Vec<u8>,
}

/// Reads text lines out of a raster image
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in an encoded image, returning lines in reading order.
    /// A blank image yields an empty sequence, not an error.
    fn read_text(&self, image: &[u8]) -> Result<Vec<String>>;
}

/// Renders PDF pages to images at a given resolution
pub trait PageRasterizer: Send + Sync {
    /// Rasterize every page of a PDF, in page order
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<PageImage>>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-process stand-ins for the CLI engines

    use super::*;

    /// Recognizer returning a fixed set of lines for every image
    #[derive(Default)]
    pub struct MockRecognizer {
        pub lines: Vec<String>,
    }

    impl MockRecognizer {
        pub fn with_lines(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
            }
        }
    }

    impl TextRecognizer for MockRecognizer {
        fn read_text(&self, _image: &[u8]) -> Result<Vec<String>> {
            Ok(self.lines.clone())
        }
    }

    /// Rasterizer yielding a fixed number of empty page images
    #[derive(Default)]
    pub struct MockRasterizer {
        pub pages: u32,
    }

    impl PageRasterizer for MockRasterizer {
        fn rasterize(&self, _pdf: &[u8], _dpi: u32) -> Result<Vec<PageImage>> {
            Ok((1..=self.pages)
                .map(|page_number| PageImage {
                    page_number,
                    data: Vec::new(),
                })
                .collect())
        }
    }
}
