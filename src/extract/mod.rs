//! Text extraction from procurement documents.
//!
//! Extracts text using:
//! - pdftotext (Poppler) for the PDF text layer
//! - pdftoppm + Tesseract OCR for image-only PDFs and image files
//! - calamine for spreadsheets and the csv crate for CSV files
//! - mail-parser for RFC822 (.eml) messages
//!
//! The format is chosen from the file extension only. Every extractor's
//! output is normalized before it reaches the classifier.

mod dispatch;
mod email;
mod extractor;
mod tabular;
mod tools;

use thiserror::Error;

pub use dispatch::{extract_from_file, ExtractedText};
pub use email::{EmailExtractor, ParsedEmail};
pub use extractor::{ExtractionMethod, ExtractionResult, TextExtractor};
pub use tabular::{render_table, TabularExtractor};
pub use tools::{check_tools, ToolStatus};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse email: {0}")]
    EmailParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
