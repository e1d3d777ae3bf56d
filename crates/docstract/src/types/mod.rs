//! Core types for the extraction service

pub mod extraction;
pub mod item;
pub mod response;

pub use extraction::{
    DerivedFields, ExtractionFailure, ExtractionResult, FailureKind, ImageBlob, PageText, Table,
};
pub use item::{FileItem, FileKind};
pub use response::{ApproveRequest, BatchSummary, ExtractResponse, ItemError, ItemSummary};
