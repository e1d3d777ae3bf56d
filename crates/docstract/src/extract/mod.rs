//! File-type dispatch and multi-format extraction pipeline

mod archive;
mod image;
mod pdf;
mod pipeline;
mod registry;
mod tabular;
mod text;
mod word;

pub use archive::{expand, Expansion, SkippedEntry};
pub use image::ImageOcrStrategy;
pub use pdf::{PdfProbe, RasterOcrStrategy};
pub use pipeline::{BatchOutcome, ExtractionPipeline};
pub use registry::{Extraction, ExtractorRegistry, Strategy};
pub use tabular::{CsvStrategy, SpreadsheetStrategy};
pub use text::PlainTextStrategy;
pub use word::DocxStrategy;
