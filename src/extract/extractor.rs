//! Text extraction from PDFs, images and plain text using pdftotext and Tesseract.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use super::tools::{check_cmd_status, handle_cmd_output, tool_path};
use super::ExtractionError;

/// Result of text extraction.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Extracted text content, not yet normalized.
    pub text: String,
    /// Method used for extraction.
    pub method: ExtractionMethod,
    /// Number of pages OCR'd (for image-only PDFs).
    pub page_count: Option<u32>,
}

/// Method used to extract text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Direct text extraction from the PDF text layer.
    PdfToText,
    /// OCR using Tesseract.
    TesseractOcr,
    /// File contents read as-is.
    Direct,
    /// Spreadsheet or CSV rendered as a text table.
    Tabular,
    /// Decoded email body parts.
    Email,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdfToText => "pdftotext",
            Self::TesseractOcr => "tesseract",
            Self::Direct => "direct",
            Self::Tabular => "tabular",
            Self::Email => "email",
        }
    }
}

/// Text extractor that uses external tools.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// Tesseract language setting.
    tesseract_lang: String,
    /// Resolution used when rasterizing PDF pages for OCR.
    ocr_dpi: u32,
    /// Whether OCR may run at all (image files and PDF fallback).
    ocr_enabled: bool,
    /// Directory holding the external binaries; PATH lookup when unset.
    tool_dir: Option<PathBuf>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            tesseract_lang: "eng".to_string(),
            ocr_dpi: 300,
            ocr_enabled: true,
            tool_dir: None,
        }
    }
}

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.tesseract_lang = lang.to_string();
        self
    }

    /// Set rasterization DPI for PDF OCR.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.ocr_dpi = dpi;
        self
    }

    /// Enable or disable OCR.
    pub fn with_ocr(mut self, enabled: bool) -> Self {
        self.ocr_enabled = enabled;
        self
    }

    /// Look up external binaries in `dir` instead of PATH.
    pub fn with_tool_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.tool_dir = dir;
        self
    }

    pub fn tool_dir(&self) -> Option<&Path> {
        self.tool_dir.as_deref()
    }

    pub fn ocr_enabled(&self) -> bool {
        self.ocr_enabled
    }

    /// Extract text from a PDF, falling back to OCR when the text layer is empty.
    pub fn extract_pdf(&self, file_path: &Path) -> Result<ExtractionResult, ExtractionError> {
        let text = self.run_pdftotext(file_path)?;
        if !text.trim().is_empty() {
            return Ok(ExtractionResult {
                text,
                method: ExtractionMethod::PdfToText,
                page_count: None,
            });
        }

        if !self.ocr_enabled {
            tracing::info!(
                "{} has no text layer and OCR is disabled",
                file_path.display()
            );
            return Ok(ExtractionResult {
                text,
                method: ExtractionMethod::PdfToText,
                page_count: None,
            });
        }

        tracing::info!(
            "{} has no text layer, falling back to OCR",
            file_path.display()
        );
        let (text, pages) = self.ocr_pdf(file_path)?;
        Ok(ExtractionResult {
            text,
            method: ExtractionMethod::TesseractOcr,
            page_count: Some(pages),
        })
    }

    /// Extract text from an image file using Tesseract.
    pub fn extract_image(&self, file_path: &Path) -> Result<ExtractionResult, ExtractionError> {
        if !self.ocr_enabled {
            return Err(ExtractionError::ExtractionFailed(
                "OCR is disabled in configuration".to_string(),
            ));
        }
        let text = self.run_tesseract(file_path)?;
        Ok(ExtractionResult {
            text,
            method: ExtractionMethod::TesseractOcr,
            page_count: Some(1),
        })
    }

    /// Read a plain text file as UTF-8.
    pub fn extract_plain_text(
        &self,
        file_path: &Path,
    ) -> Result<ExtractionResult, ExtractionError> {
        let text = std::fs::read_to_string(file_path)?;
        Ok(ExtractionResult {
            text,
            method: ExtractionMethod::Direct,
            page_count: None,
        })
    }

    /// Run pdftotext on a PDF file.
    fn run_pdftotext(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(self.tool("pdftotext"))
            .args(["-layout", "-enc", "UTF-8"])
            .arg(file_path)
            .arg("-") // Output to stdout
            .output();

        handle_cmd_output(output, "pdftotext (install poppler-utils)", "pdftotext failed")
    }

    /// OCR a PDF by converting pages to images and running Tesseract.
    /// Returns the concatenated page texts and the number of pages seen.
    fn ocr_pdf(&self, file_path: &Path) -> Result<(String, u32), ExtractionError> {
        let temp_dir = TempDir::new()?;
        let temp_path = temp_dir.path();

        let dpi = self.ocr_dpi.to_string();
        let status = Command::new(self.tool("pdftoppm"))
            .args(["-png", "-r", &dpi])
            .arg(file_path)
            .arg(temp_path.join("page"))
            .status();

        check_cmd_status(
            status,
            "pdftoppm (install poppler-utils)",
            "pdftoppm failed to convert PDF",
        )?;

        let images = page_images(temp_path)?;
        if images.is_empty() {
            return Err(ExtractionError::ExtractionFailed(
                "No images generated from PDF".to_string(),
            ));
        }

        let mut all_text = String::new();
        let mut succeeded = 0;
        let mut last_error = None;
        for (i, image_path) in images.iter().enumerate() {
            match self.run_tesseract(image_path) {
                Ok(text) => {
                    all_text.push_str(&text);
                    succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!("OCR failed for page {}: {}", i + 1, e);
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            return Err(match last_error {
                Some(ExtractionError::ToolNotFound(tool)) => ExtractionError::ToolNotFound(tool),
                Some(e) => ExtractionError::ExtractionFailed(format!(
                    "OCR failed on all {} pages: {}",
                    images.len(),
                    e
                )),
                None => ExtractionError::ExtractionFailed("OCR produced no pages".to_string()),
            });
        }

        Ok((all_text, images.len() as u32))
    }

    /// Run Tesseract OCR on an image.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(self.tool("tesseract"))
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.tesseract_lang])
            .output();

        handle_cmd_output(output, "tesseract (install tesseract-ocr)", "tesseract failed")
    }

    fn tool(&self, name: &str) -> PathBuf {
        tool_path(name, self.tool_dir.as_deref())
    }
}

/// Rendered page images in page order.
///
/// pdftoppm zero-pads page numbers to a uniform width within one document
/// (page-01.png, page-02.png, ...), so a lexical sort is page order.
fn page_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut images: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    images.sort();
    Ok(images)
}
