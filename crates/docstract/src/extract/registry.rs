//! Strategy registry: total mapping from file kind to extractor

use std::sync::Arc;

use crate::config::OcrConfig;
use crate::error::{Error, Result};
use crate::ocr::{PageRasterizer, TextRecognizer};
use crate::types::{FileItem, FileKind, ImageBlob, PageText, Table};

use super::image::ImageOcrStrategy;
use super::pdf::RasterOcrStrategy;
use super::tabular::{CsvStrategy, SpreadsheetStrategy};
use super::text::PlainTextStrategy;
use super::word::DocxStrategy;

/// The partial result a strategy produces for one file
#[derive(Debug, Default)]
pub struct Extraction {
    /// Per-page text in page order
    pub pages: Vec<PageText>,
    /// Tables associated to their page number
    pub tables: Vec<Table>,
    /// Embedded images copied out of the document
    pub images: Vec<ImageBlob>,
}

/// One extraction method, selected by file kind
pub trait Strategy: Send + Sync {
    /// Extract normalized content from a single file
    fn extract(&self, item: &FileItem) -> Result<Extraction>;
}

/// Maps every [`FileKind`] to its extraction strategy
///
/// The mapping is exhaustive over the enum; `Unsupported` is the explicit
/// terminal case, not a fallthrough.
pub struct ExtractorRegistry {
    pdf: RasterOcrStrategy,
    image: ImageOcrStrategy,
    word: DocxStrategy,
    excel: SpreadsheetStrategy,
    csv: CsvStrategy,
    text: PlainTextStrategy,
}

impl ExtractorRegistry {
    /// Build the registry with injected OCR collaborators
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: OcrConfig,
    ) -> Self {
        Self {
            pdf: RasterOcrStrategy::new(recognizer.clone(), rasterizer, ocr),
            image: ImageOcrStrategy::new(recognizer),
            word: DocxStrategy::new(),
            excel: SpreadsheetStrategy::new(),
            csv: CsvStrategy::new(),
            text: PlainTextStrategy::new(),
        }
    }

    /// Select the strategy for a file kind
    pub fn select(&self, kind: FileKind) -> Result<&dyn Strategy> {
        match kind {
            FileKind::Pdf => Ok(&self.pdf),
            FileKind::Image => Ok(&self.image),
            FileKind::Word => Ok(&self.word),
            FileKind::Excel => Ok(&self.excel),
            FileKind::Csv => Ok(&self.csv),
            FileKind::PlainText => Ok(&self.text),
            FileKind::Unsupported => Err(Error::UnsupportedFormat(
                "no extraction strategy for this file type".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::testing::{MockRasterizer, MockRecognizer};

    fn registry() -> ExtractorRegistry {
        ExtractorRegistry::new(
            Arc::new(MockRecognizer::default()),
            Arc::new(MockRasterizer::default()),
            OcrConfig::default(),
        )
    }

    #[test]
    fn test_dispatch_is_total_over_supported_kinds() {
        let registry = registry();
        for kind in [
            FileKind::Pdf,
            FileKind::Image,
            FileKind::Word,
            FileKind::Excel,
            FileKind::Csv,
            FileKind::PlainText,
        ] {
            assert!(registry.select(kind).is_ok(), "no strategy for {:?}", kind);
        }
    }

    #[test]
    fn test_unsupported_kind_is_rejected() {
        let registry = registry();
        assert!(matches!(
            registry.select(FileKind::Unsupported),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
