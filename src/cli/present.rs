//! Console rendering of per-file reports.

use std::fmt::Write;

use console::style;

use crate::services::{FileReport, Outcome};

/// Render a report as the human-readable console block.
pub fn render_text(report: &FileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nProcessing file: {}", report.path.display());

    if let Some(diagnostic) = &report.diagnostic {
        let _ = writeln!(out, "{} {}", style("!").yellow(), diagnostic);
    }

    match &report.outcome {
        Outcome::NoText => {
            let _ = write!(out, "No text extracted from the file.");
        }
        Outcome::Unidentified { .. } => {
            let _ = write!(out, "No specific document type identified.");
        }
        Outcome::Extracted {
            classification,
            fields,
            ..
        } => {
            let _ = writeln!(out, "\nClassification Results:");
            for (doc_type, set) in classification.flags() {
                if set {
                    let _ = writeln!(out, "  - {}: {}", doc_type.flag_label(), set);
                }
            }

            let _ = write!(out, "\nExtracted Information:");
            for (name, value) in fields.iter() {
                let _ = write!(out, "\n  - {}: {}", name, value);
            }
        }
    }

    out
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &FileReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationResult, DocumentFormat, DocumentType, ExtractedFields};
    use std::path::PathBuf;

    fn report(outcome: Outcome, diagnostic: Option<&str>) -> FileReport {
        FileReport {
            path: PathBuf::from("/data/rfq.txt"),
            format: Some(DocumentFormat::PlainText),
            diagnostic: diagnostic.map(str::to_string),
            outcome,
        }
    }

    #[test]
    fn test_render_no_text_with_diagnostic() {
        let text = render_text(&report(
            Outcome::NoText,
            Some("Unsupported file type: .docx"),
        ));
        assert!(text.starts_with("\nProcessing file: /data/rfq.txt\n"));
        assert!(text.contains("Unsupported file type: .docx"));
        assert!(text.ends_with("No text extracted from the file."));
    }

    #[test]
    fn test_render_unidentified() {
        let text = render_text(&report(
            Outcome::Unidentified {
                classification: ClassificationResult::only(DocumentType::Delivery),
            },
            None,
        ));
        assert!(text.ends_with("No specific document type identified."));
        assert!(!text.contains("Classification Results"));
    }

    #[test]
    fn test_render_extracted_lists_only_true_flags() {
        let mut fields = ExtractedFields::new();
        fields.push("RFQ Number", Some("Q-1001"));
        fields.push("Agency", None);
        let text = render_text(&report(
            Outcome::Extracted {
                classification: ClassificationResult::only(DocumentType::Rfq),
                document_type: DocumentType::Rfq,
                fields,
            },
            None,
        ));

        assert!(text.contains("Classification Results:\n  - IsRFQ: true\n"));
        assert!(!text.contains("IsPO"));
        assert!(!text.contains("IsDelivery"));
        assert!(text.ends_with(
            "Extracted Information:\n  - RFQ Number: Q-1001\n  - Agency: N/A"
        ));
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&report(Outcome::NoText, None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "no_text");
        assert_eq!(value["path"], "/data/rfq.txt");
        assert_eq!(value["format"], "plain_text");
        assert!(value["diagnostic"].is_null());
    }
}
