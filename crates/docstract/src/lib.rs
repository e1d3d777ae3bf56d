//! docstract: multi-format document text extraction service
//!
//! Accepts uploaded documents (PDF, image, Word, Excel, CSV, plain text, or
//! a ZIP of these), dispatches by file type to the matching extraction
//! strategy, normalizes the output into per-page text plus tables, embedded
//! images, and pattern-derived fields, and exports or persists results after
//! a per-item human approval step. OCR and rasterization are external
//! collaborators behind capability traits.

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod fields;
pub mod ocr;
pub mod server;
pub mod sink;
pub mod types;

pub use batch::{Batch, ExportDocument};
pub use config::{ExtractorConfig, OcrPolicy};
pub use error::{Error, Result};
pub use extract::{ExtractionPipeline, ExtractorRegistry};
pub use fields::FieldDeriver;
pub use types::{ExtractionResult, FileItem, FileKind, PageText};
