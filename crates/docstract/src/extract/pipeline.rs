//! Extraction pipeline: classify, dispatch, normalize, aggregate

use std::time::Instant;

use crate::batch::Batch;
use crate::error::Result;
use crate::fields::FieldDeriver;
use crate::types::item::is_archive;
use crate::types::{ExtractionResult, FileItem};

use super::archive::{self, SkippedEntry};
use super::registry::ExtractorRegistry;

/// A processed upload: the batch plus entries dropped during expansion
#[derive(Debug)]
pub struct BatchOutcome {
    /// Results in upload/archive order
    pub batch: Batch,
    /// Archive entries that never reached extraction
    pub skipped: Vec<SkippedEntry>,
}

/// Runs uploads through strategy dispatch and field derivation
///
/// Per-item failures are converted into `ExtractionResult.error` here, at the
/// pipeline boundary; a batch always runs to completion.
pub struct ExtractionPipeline {
    registry: ExtractorRegistry,
    deriver: FieldDeriver,
}

impl ExtractionPipeline {
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            registry,
            deriver: FieldDeriver::new(),
        }
    }

    /// Extract one file item into a normalized result
    ///
    /// Never fails: strategy errors come back as a result with `error` set
    /// and empty pages.
    pub fn run_item(&self, item: &FileItem) -> ExtractionResult {
        let start = Instant::now();

        let outcome = self
            .registry
            .select(item.kind)
            .and_then(|strategy| strategy.extract(item));

        let result = match outcome {
            Ok(extraction) => {
                let mut result = ExtractionResult::success(
                    &item.name,
                    item.kind,
                    extraction.pages,
                    extraction.tables,
                    extraction.images,
                );
                result.derived = self.deriver.derive(&result.combined_text());
                result
            }
            Err(err) => {
                tracing::warn!("Extraction failed for {}: {}", item.name, err);
                ExtractionResult::failure(&item.name, item.kind, &err)
            }
        };

        tracing::info!(
            "Processed {} ({} pages, {} chars) in {:.2}s",
            item.name,
            result.pages.len(),
            result.char_count(),
            start.elapsed().as_secs_f64()
        );
        result
    }

    /// Process one upload: expand ZIPs, extract every item, aggregate
    ///
    /// An unreadable archive is the only fatal case; anything past expansion
    /// ends up in the batch, failed items included.
    pub fn run_batch(&self, name: &str, bytes: Vec<u8>) -> Result<BatchOutcome> {
        let (items, skipped) = if is_archive(name) {
            let expansion = archive::expand(name, &bytes)?;
            (expansion.items, expansion.skipped)
        } else {
            (vec![FileItem::new(name, bytes)], Vec::new())
        };

        let mut batch = Batch::new();
        for item in &items {
            batch.add(self.run_item(item));
        }

        Ok(BatchOutcome { batch, skipped })
    }
}
