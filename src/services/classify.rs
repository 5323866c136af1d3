//! Keyword-based document type classification.
//!
//! Rules are evaluated top to bottom and the first family that matches the
//! subject or body wins; later families are never tested. A body mentioning
//! both a quote and a purchase order is therefore an RFQ only.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{ClassificationResult, DocumentType};

/// Keyword families in priority order.
const KEYWORD_FAMILIES: [(DocumentType, &[&str]); 3] = [
    (DocumentType::Rfq, &["rfq", "quote", "mrr", "quotation"]),
    (DocumentType::Po, &["purchase order", "po", "spo"]),
    (
        DocumentType::Delivery,
        &["delivery", "tracking", "shipment", "shipping"],
    ),
];

/// Compiled rules: case-insensitive whole-word alternation per family.
static RULES: LazyLock<Vec<(DocumentType, Regex)>> = LazyLock::new(|| {
    KEYWORD_FAMILIES
        .iter()
        .map(|(doc_type, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| format!(r"\b{}\b", regex::escape(k)))
                .collect::<Vec<_>>()
                .join("|");
            (*doc_type, Regex::new(&format!("(?i){}", alternation)).unwrap())
        })
        .collect()
});

/// Classify a document from its subject and body.
///
/// `sender` is accepted for callers that have it but is not matched.
pub fn classify(subject: &str, _sender: &str, body: &str) -> ClassificationResult {
    for (doc_type, pattern) in RULES.iter() {
        if pattern.is_match(subject) || pattern.is_match(body) {
            tracing::debug!("Classified as {}", doc_type.as_str());
            return ClassificationResult::only(*doc_type);
        }
    }
    ClassificationResult::default()
}
