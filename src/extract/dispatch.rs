//! Extension-based dispatch to the per-format extractors.

use serde::Serialize;
use std::path::Path;

use super::email::EmailExtractor;
use super::extractor::{ExtractionMethod, ExtractionResult, TextExtractor};
use super::tabular::TabularExtractor;
use super::ExtractionError;
use crate::models::{path_extension, DocumentFormat};
use crate::utils::normalize;

/// Text pulled out of one file.
///
/// Extraction never fails outright: any error is kept in `diagnostic` for
/// the caller to report, and the text is left empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedText {
    /// Normalized body text.
    pub text: String,
    /// Subject header (email only, unnormalized).
    pub subject: Option<String>,
    /// Sender header (email only, unnormalized).
    pub sender: Option<String>,
    /// Format the extension mapped to, if supported.
    pub format: Option<DocumentFormat>,
    /// Why extraction failed, if it did.
    pub diagnostic: Option<String>,
}

impl ExtractedText {
    fn failed(format: Option<DocumentFormat>, diagnostic: String) -> Self {
        Self {
            format,
            diagnostic: Some(diagnostic),
            ..Default::default()
        }
    }
}

/// Extract normalized text from any supported file type.
pub fn extract_from_file(path: &Path, extractor: &TextExtractor) -> ExtractedText {
    let extension = path_extension(path);
    let Some(format) = DocumentFormat::from_extension(&extension) else {
        let err = ExtractionError::UnsupportedFileType(extension);
        tracing::debug!("{}", err);
        return ExtractedText::failed(None, err.to_string());
    };

    match extract_format(path, format, extractor) {
        Ok(extracted) => extracted,
        Err(e) => {
            tracing::debug!(
                "Error extracting text from {} {}: {}",
                format.as_str(),
                path.display(),
                e
            );
            ExtractedText::failed(
                Some(format),
                format!("Error extracting text from {}: {}", path.display(), e),
            )
        }
    }
}

fn extract_format(
    path: &Path,
    format: DocumentFormat,
    extractor: &TextExtractor,
) -> Result<ExtractedText, ExtractionError> {
    let result: ExtractionResult = match format {
        DocumentFormat::Email => return extract_email(path),
        DocumentFormat::Pdf => extractor.extract_pdf(path)?,
        DocumentFormat::Image => extractor.extract_image(path)?,
        DocumentFormat::Spreadsheet => TabularExtractor::extract_spreadsheet(path)?,
        DocumentFormat::Csv => TabularExtractor::extract_csv(path)?,
        DocumentFormat::PlainText => extractor.extract_plain_text(path)?,
    };

    tracing::debug!(
        "Extracted {} via {} ({} chars{})",
        path.display(),
        result.method.as_str(),
        result.text.len(),
        result
            .page_count
            .map(|p| format!(", {} pages", p))
            .unwrap_or_default()
    );

    Ok(ExtractedText {
        text: normalize(&result.text),
        format: Some(format),
        ..Default::default()
    })
}

fn extract_email(path: &Path) -> Result<ExtractedText, ExtractionError> {
    let parsed = EmailExtractor::parse_file(path)?;
    tracing::debug!(
        "Extracted {} via {}",
        path.display(),
        ExtractionMethod::Email.as_str()
    );
    Ok(ExtractedText {
        text: normalize(&parsed.body),
        subject: Some(parsed.subject),
        sender: Some(parsed.from),
        format: Some(DocumentFormat::Email),
        diagnostic: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_unsupported_extension() {
        let extracted = extract_from_file(Path::new("/tmp/contract.docx"), &TextExtractor::new());
        assert_eq!(extracted.text, "");
        assert_eq!(extracted.format, None);
        assert_eq!(
            extracted.diagnostic.as_deref(),
            Some("Unsupported file type: .docx")
        );
    }

    #[test]
    fn test_uppercase_extension_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NOTE.TXT");
        fs::write(&path, "  Quote\n\nrequested  ").unwrap();

        let extracted = extract_from_file(&path, &TextExtractor::new());
        assert_eq!(extracted.format, Some(DocumentFormat::PlainText));
        assert_eq!(extracted.text, "Quote requested");
        assert!(extracted.diagnostic.is_none());
        assert!(extracted.subject.is_none());
    }

    #[test]
    fn test_missing_file_is_recovered() {
        let extracted = extract_from_file(
            Path::new("/nonexistent/procurescan/po.txt"),
            &TextExtractor::new(),
        );
        assert_eq!(extracted.text, "");
        assert_eq!(extracted.format, Some(DocumentFormat::PlainText));
        let diagnostic = extracted.diagnostic.unwrap();
        assert!(diagnostic.contains("/nonexistent/procurescan/po.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_pdf_ocr_leaves_diagnostic() {
        use std::os::unix::fs::PermissionsExt;

        let bin = tempfile::tempdir().unwrap();
        for (name, script) in [
            ("pdftotext", "exit 0"),
            ("pdftoppm", "for last; do :; done\n: > \"$last-1.png\""),
            ("tesseract", "exit 1"),
        ] {
            let path = bin.path().join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("scan.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        let extractor = TextExtractor::new().with_tool_dir(Some(bin.path().to_path_buf()));
        let extracted = extract_from_file(&pdf, &extractor);
        assert_eq!(extracted.text, "");
        assert_eq!(extracted.format, Some(DocumentFormat::Pdf));
        let diagnostic = extracted.diagnostic.unwrap();
        assert!(diagnostic.contains("OCR failed on all 1 pages"), "{}", diagnostic);
    }

    #[test]
    fn test_email_headers_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg.eml");
        fs::write(
            &path,
            "From: buyer@agency.gov\r\nSubject: PO update\r\n\r\nLine one\r\n\r\n  Line two\r\n",
        )
        .unwrap();

        let extracted = extract_from_file(&path, &TextExtractor::new());
        assert_eq!(extracted.subject.as_deref(), Some("PO update"));
        assert_eq!(extracted.sender.as_deref(), Some("buyer@agency.gov"));
        assert_eq!(extracted.text, "Line one Line two");
    }
}
