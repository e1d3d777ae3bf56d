//! Application state for the extraction server

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::batch::Batch;
use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::extract::{ExtractionPipeline, ExtractorRegistry};
use crate::ocr::{PageRasterizer, PdftoppmRasterizer, TesseractOcr, TextRecognizer};
use crate::sink::SqliteStore;
use crate::types::ItemSummary;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ExtractorConfig,
    /// Extraction pipeline with injected OCR collaborators
    pipeline: ExtractionPipeline,
    /// Document store for saved extractions
    store: Arc<SqliteStore>,
    /// In-memory batch registry, keyed by batch id
    batches: DashMap<Uuid, Batch>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state with the default engines
    ///
    /// Probes the OCR collaborators first; a missing binary is fatal here,
    /// at startup, rather than on the first upload.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        tracing::info!("Initializing extraction service state...");

        let store = Arc::new(SqliteStore::new(&config.store.database_path)?);
        tracing::info!(
            "Document store opened at {}",
            config.store.database_path.display()
        );

        TesseractOcr::probe()?;
        PdftoppmRasterizer::probe()?;
        tracing::info!("OCR collaborators available (tesseract, pdftoppm)");

        let recognizer: Arc<dyn TextRecognizer> =
            Arc::new(TesseractOcr::new(&config.ocr.language));
        let rasterizer: Arc<dyn PageRasterizer> = Arc::new(PdftoppmRasterizer::new());

        Ok(Self::from_parts(config, recognizer, rasterizer, store))
    }

    /// Assemble state from explicitly constructed capabilities
    pub fn from_parts(
        config: ExtractorConfig,
        recognizer: Arc<dyn TextRecognizer>,
        rasterizer: Arc<dyn PageRasterizer>,
        store: Arc<SqliteStore>,
    ) -> Self {
        let registry = ExtractorRegistry::new(recognizer, rasterizer, config.ocr.clone());
        let pipeline = ExtractionPipeline::new(registry);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                store,
                batches: DashMap::new(),
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.inner.config
    }

    /// Get the extraction pipeline
    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.inner.pipeline
    }

    /// Get the document store
    pub fn store(&self) -> &SqliteStore {
        &self.inner.store
    }

    /// Whether exported documents carry derived fields
    pub fn include_derived(&self) -> bool {
        self.inner.config.export.include_derived_fields
    }

    /// Register a processed batch
    pub fn add_batch(&self, batch: Batch) {
        self.inner.batches.insert(batch.id, batch);
    }

    /// Snapshot one batch by id
    pub fn get_batch(&self, id: Uuid) -> Result<Batch> {
        self.inner
            .batches
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::BatchNotFound(id.to_string()))
    }

    /// Summaries of all batches, newest first
    pub fn list_batches(&self) -> Vec<crate::types::BatchSummary> {
        let mut summaries: Vec<crate::types::BatchSummary> = self
            .inner
            .batches
            .iter()
            .map(|entry| entry.value().into())
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Set the approval flag on one batch item
    pub fn approve_item(&self, id: Uuid, index: usize, approved: bool) -> Result<ItemSummary> {
        let mut entry = self
            .inner
            .batches
            .get_mut(&id)
            .ok_or_else(|| Error::BatchNotFound(id.to_string()))?;

        let batch = entry.value_mut();
        batch.approve(index, approved)?;
        Ok(ItemSummary::from_result(index, batch.get(index)?))
    }

    /// Check readiness
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::ocr::testing::{MockRasterizer, MockRecognizer};

    /// State wired to mock OCR engines and an in-memory store
    pub fn mock_state() -> AppState {
        AppState::from_parts(
            ExtractorConfig::default(),
            Arc::new(MockRecognizer::default()),
            Arc::new(MockRasterizer::default()),
            Arc::new(SqliteStore::in_memory().unwrap()),
        )
    }
}
