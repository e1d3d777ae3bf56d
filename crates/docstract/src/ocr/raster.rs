//! PDF page rasterization via pdftoppm (poppler-utils)

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};
use crate::ocr::{PageImage, PageRasterizer};

/// Rasterizer shelling out to the pdftoppm CLI
pub struct PdftoppmRasterizer;

impl PdftoppmRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Verify the pdftoppm binary is present
    pub fn probe() -> Result<()> {
        // pdftoppm -v prints to stderr with a nonzero-agnostic status;
        // only command existence matters here
        let available = Command::new("pdftoppm").arg("-v").output().is_ok();

        if available {
            Ok(())
        } else {
            Err(Error::unavailable(
                "pdftoppm not found. Install with: apt install poppler-utils",
            ))
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<PageImage>> {
        // Scoped temp dir, removed on drop on every exit path
        let dir = tempfile::tempdir()?;
        let pdf_path = dir.path().join("input.pdf");
        std::fs::write(&pdf_path, pdf)?;

        let output = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi.to_string()])
            .arg(&pdf_path)
            .arg(dir.path().join("page"))
            .output()
            .map_err(|e| Error::unavailable(format!("failed to run pdftoppm: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::internal(format!("pdftoppm error: {}", stderr)));
        }

        // pdftoppm names output page-<n>.png with zero padding that depends
        // on the page count; sort on the parsed number, not the string
        let mut numbered: Vec<(u32, PathBuf)> = std::fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .filter_map(|p| {
                let number = p
                    .file_stem()?
                    .to_str()?
                    .rsplit('-')
                    .next()?
                    .parse::<u32>()
                    .ok()?;
                Some((number, p))
            })
            .collect();
        numbered.sort_by_key(|(n, _)| *n);

        if numbered.is_empty() {
            return Err(Error::internal("pdftoppm produced no page images"));
        }

        let mut pages = Vec::with_capacity(numbered.len());
        for (index, (_, path)) in numbered.into_iter().enumerate() {
            let data = std::fs::read(&path)?;
            // Renumber so page numbers are contiguous from 1
            pages.push(PageImage {
                page_number: index as u32 + 1,
                data,
            });
        }

        Ok(pages)
    }
}
