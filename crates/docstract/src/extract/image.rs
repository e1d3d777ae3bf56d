//! Direct OCR over raster images

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ocr::TextRecognizer;
use crate::types::{FileItem, PageText};

use super::registry::{Extraction, Strategy};

/// Image strategy: decode, then OCR the whole frame, no pagination
pub struct ImageOcrStrategy {
    recognizer: Arc<dyn TextRecognizer>,
}

impl ImageOcrStrategy {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self { recognizer }
    }
}

impl Strategy for ImageOcrStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        // Decode up front so unreadable bytes fail as corrupt input instead
        // of surfacing as an OCR engine error
        image::load_from_memory(&item.bytes)
            .map_err(|e| Error::corrupt(&item.name, format!("unreadable image: {}", e)))?;

        let lines = self.recognizer.read_text(&item.bytes)?;

        Ok(Extraction {
            pages: vec![PageText {
                page_number: 1,
                text: lines.join("\n"),
            }],
            tables: Vec::new(),
            images: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::testing::MockRecognizer;
    use std::io::Cursor;

    fn blank_png() -> Vec<u8> {
        let img = image::RgbImage::new(4, 4);
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_blank_image_yields_empty_text_not_error() {
        let strategy = ImageOcrStrategy::new(Arc::new(MockRecognizer::default()));
        let item = FileItem::new("blank.png", blank_png());

        let extraction = strategy.extract(&item).unwrap();
        assert_eq!(extraction.pages.len(), 1);
        assert_eq!(extraction.pages[0].page_number, 1);
        assert!(extraction.pages[0].text.is_empty());
    }

    #[test]
    fn test_recognized_lines_join_in_order() {
        let strategy =
            ImageOcrStrategy::new(Arc::new(MockRecognizer::with_lines(&["top", "bottom"])));
        let item = FileItem::new("scan.png", blank_png());

        let extraction = strategy.extract(&item).unwrap();
        assert_eq!(extraction.pages[0].text, "top\nbottom");
    }

    #[test]
    fn test_undecodable_bytes_are_corrupt_input() {
        let strategy = ImageOcrStrategy::new(Arc::new(MockRecognizer::default()));
        let item = FileItem::new("broken.png", b"definitely not pixels".to_vec());

        let err = strategy.extract(&item).unwrap_err();
        assert!(matches!(err, Error::CorruptInput { .. }));
    }
}
