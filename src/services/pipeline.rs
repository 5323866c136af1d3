//! Per-file processing: extract, classify, then pull fields.
//!
//! Files are processed one at a time and share no state. A failure in one
//! file is recorded in its report and never stops the rest.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::classify::classify;
use super::fields::extract_fields;
use crate::extract::{extract_from_file, TextExtractor};
use crate::models::{ClassificationResult, Document, DocumentFormat, DocumentType, ExtractedFields};

/// Operator-supplied headers for files that don't carry their own.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub subject: Option<String>,
    pub sender: Option<String>,
}

/// What happened to one file after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Extraction produced no text.
    NoText,
    /// Text was found but no RFQ/PO type was identified.
    Unidentified {
        classification: ClassificationResult,
    },
    /// RFQ or PO with its extracted fields.
    Extracted {
        classification: ClassificationResult,
        document_type: DocumentType,
        fields: ExtractedFields,
    },
}

/// Structured result of processing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub format: Option<DocumentFormat>,
    /// Extraction error or unsupported-format notice, if any.
    pub diagnostic: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Build a `Document` for `path`, applying overrides unless the file is an email.
pub fn load_document(
    path: &Path,
    overrides: &Overrides,
    extractor: &TextExtractor,
) -> (Document, Option<String>) {
    let extracted = extract_from_file(path, extractor);

    let is_email = extracted.format.is_some_and(|f| f.has_headers());
    let (subject, sender) = if is_email {
        (extracted.subject, extracted.sender)
    } else {
        (overrides.subject.clone(), overrides.sender.clone())
    };

    let document = Document::new(path, extracted.text).with_headers(subject, sender);
    (document, extracted.diagnostic)
}

/// Classify a loaded document and extract its fields.
pub fn analyze(document: &Document) -> Outcome {
    if !document.has_text() {
        return Outcome::NoText;
    }

    let classification = classify(
        document.subject_or_empty(),
        document.sender_or_empty(),
        &document.raw_body,
    );

    match classification.primary() {
        Some(doc_type @ (DocumentType::Rfq | DocumentType::Po)) => Outcome::Extracted {
            classification,
            document_type: doc_type,
            fields: extract_fields(doc_type, &document.raw_body),
        },
        Some(DocumentType::Delivery) | None => Outcome::Unidentified { classification },
    }
}

/// Run one file through the whole pipeline.
pub fn process_file(path: &Path, overrides: &Overrides, extractor: &TextExtractor) -> FileReport {
    tracing::info!("Processing {}", path.display());
    let (document, diagnostic) = load_document(path, overrides, extractor);
    let outcome = analyze(&document);

    FileReport {
        path: document.path.clone(),
        format: document.format(),
        diagnostic,
        outcome,
    }
}

/// Process files in order.
pub fn process_files<P: AsRef<Path>>(
    paths: &[P],
    overrides: &Overrides,
    extractor: &TextExtractor,
) -> Vec<FileReport> {
    paths
        .iter()
        .map(|p| process_file(p.as_ref(), overrides, extractor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        Document::new("/tmp/input.txt", body.to_string())
    }

    #[test]
    fn test_analyze_empty_body() {
        assert_eq!(analyze(&doc("")), Outcome::NoText);
    }

    #[test]
    fn test_analyze_rfq() {
        let outcome = analyze(&doc(
            "Subject: RFQ Number: Q-1001\nAgency: Dept of Widgets\nDue By: 2024-05-01",
        ));
        let Outcome::Extracted {
            classification,
            document_type,
            fields,
        } = outcome
        else {
            panic!("expected extracted outcome");
        };
        assert!(classification.is_rfq && !classification.is_po && !classification.is_delivery);
        assert_eq!(document_type, DocumentType::Rfq);
        assert_eq!(fields.get("RFQ Number"), Some("Q-1001"));
    }

    #[test]
    fn test_analyze_delivery_is_unidentified() {
        let outcome = analyze(&doc("Shipment left the warehouse"));
        assert_eq!(
            outcome,
            Outcome::Unidentified {
                classification: ClassificationResult::only(DocumentType::Delivery)
            }
        );
    }

    #[test]
    fn test_analyze_uses_subject() {
        let document = doc("SPO Number: S-9").with_headers(Some("Purchase order".into()), None);
        match analyze(&document) {
            Outcome::Extracted { document_type, .. } => assert_eq!(document_type, DocumentType::Po),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_analyze_nothing_matched() {
        let outcome = analyze(&doc("Team lunch is on Friday"));
        assert_eq!(
            outcome,
            Outcome::Unidentified {
                classification: ClassificationResult::default()
            }
        );
    }
}
