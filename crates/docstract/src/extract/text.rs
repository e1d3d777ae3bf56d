//! Plain text passthrough

use crate::error::Result;
use crate::types::{FileItem, PageText};

use super::registry::{Extraction, Strategy};

/// Text strategy: lossy UTF-8 decode, single page
pub struct PlainTextStrategy;

impl PlainTextStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for PlainTextStrategy {
    fn extract(&self, item: &FileItem) -> Result<Extraction> {
        let text = String::from_utf8_lossy(&item.bytes).to_string();

        Ok(Extraction {
            pages: vec![PageText {
                page_number: 1,
                text,
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
    fn test_utf8_passthrough() {
        let item = FileItem::new("notes.txt", "plain contents".as_bytes().to_vec());
        let extraction = PlainTextStrategy::new().extract(&item).unwrap();
        assert_eq!(extraction.pages[0].text, "plain contents");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let item = FileItem::new("mixed.txt", vec![b'o', b'k', 0xff, b'!']);
        let extraction = PlainTextStrategy::new().extract(&item).unwrap();
        assert!(extraction.pages[0].text.starts_with("ok"));
        assert!(extraction.pages[0].text.ends_with('!'));
    }
}
