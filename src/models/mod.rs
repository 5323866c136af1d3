//! Data models for procurescan.

mod classification;
mod document;

pub use classification::{ClassificationResult, DocumentType, ExtractedFields, NOT_AVAILABLE};
pub use document::{path_extension, Document, DocumentFormat};
