//! Tesseract-backed text recognition

use std::process::Command;

use crate::error::{Error, Result};
use crate::ocr::TextRecognizer;

/// Text recognizer shelling out to the tesseract CLI
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    /// Create a recognizer for the given language code
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Verify the tesseract binary is present
    ///
    /// Called once at startup; a missing binary aborts initialization.
    pub fn probe() -> Result<()> {
        let available = Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if available {
            Ok(())
        } else {
            Err(Error::unavailable(
                "tesseract not found. Install with: apt install tesseract-ocr",
            ))
        }
    }
}

impl TextRecognizer for TesseractOcr {
    fn read_text(&self, image: &[u8]) -> Result<Vec<String>> {
        // Scoped temp dir, removed on drop on every exit path
        let dir = tempfile::tempdir()?;
        let image_path = dir.path().join("input.png");
        std::fs::write(&image_path, image)?;

        let output = Command::new("tesseract")
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| Error::unavailable(format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::internal(format!("tesseract error: {}", stderr)));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        let lines = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        Ok(lines)
    }
}
