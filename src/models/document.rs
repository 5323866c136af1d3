//! Document models for extracted procurement files.
//!
//! A `Document` is built fresh for each input path and discarded once its
//! report has been presented. Nothing here is persisted.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Supported input formats, keyed purely on file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Image,
    Spreadsheet,
    Csv,
    PlainText,
    Email,
}

impl DocumentFormat {
    /// Map a lowercased extension (with or without the leading dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tiff" | "bmp" | "gif" => Some(Self::Image),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::PlainText),
            "eml" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Spreadsheet => "spreadsheet",
            Self::Csv => "csv",
            Self::PlainText => "text",
            Self::Email => "email",
        }
    }

    /// Whether the format carries its own message headers.
    pub fn has_headers(&self) -> bool {
        matches!(self, Self::Email)
    }
}

/// Lowercased extension of a path including the leading dot, or empty.
pub fn path_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// A single input file and the text pulled out of it.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Lowercased extension including the leading dot.
    pub extension: String,
    /// Normalized body text, possibly empty.
    pub raw_body: String,
    /// Subject header, from the email itself or an operator override.
    pub subject: Option<String>,
    /// Sender header, from the email itself or an operator override.
    pub sender: Option<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, raw_body: String) -> Self {
        let path = path.into();
        let extension = path_extension(&path);
        Self {
            path,
            extension,
            raw_body,
            subject: None,
            sender: None,
        }
    }

    pub fn with_headers(mut self, subject: Option<String>, sender: Option<String>) -> Self {
        self.subject = subject;
        self.sender = sender;
        self
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_extension(&self.extension)
    }

    pub fn has_text(&self) -> bool {
        !self.raw_body.is_empty()
    }

    pub fn subject_or_empty(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }

    pub fn sender_or_empty(&self) -> &str {
        self.sender.as_deref().unwrap_or("")
    }
}
