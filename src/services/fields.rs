//! Labeled field extraction for classified documents.
//!
//! Each document type has a fixed, ordered table of `(field, pattern)` rules.
//! A field takes the trimmed first capture group of its pattern, or `N/A`
//! when nothing matches. Delivery notices have no table.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::models::{DocumentType, ExtractedFields};

/// One row of a field table.
struct FieldRule {
    name: &'static str,
    pattern: &'static str,
    case_insensitive: bool,
}

const fn rule(name: &'static str, pattern: &'static str, case_insensitive: bool) -> FieldRule {
    FieldRule {
        name,
        pattern,
        case_insensitive,
    }
}

// Agency runs up to the next boundary word or end of line. The boundary is
// consumed here but sits outside the capture group.
const AGENCY: &str =
    r"(?m)Agency\s*[:\-]?\s*(.+?)\s*(?:Request|Attachments|Requirements|$)";
const EMAIL: &str = r"Email\s*[:\-]?\s*(\S+@\S+)";
const LINE_ITEMS: &str = r"Line Items\s*[:\-]?\s*(\d+)";

const RFQ_FIELDS: &[FieldRule] = &[
    rule(
        "RFQ Number",
        r"RFQ\s*(?:No\.?|Number)?\s*[:\-]?\s*(\w[\w-]*)",
        true,
    ),
    rule("Agency", AGENCY, true),
    rule("Email", EMAIL, true),
    rule(
        "Release Date",
        r"Release Date\s*[:\-]?\s*(\d{4}-\d{2}-\d{2})",
        false,
    ),
    rule("Due By", r"Due By\s*[:\-]?\s*(\d{4}-\d{2}-\d{2})", false),
    rule("Line Items", LINE_ITEMS, false),
    rule("Quotes", r"Quotes\s*[:\-]?\s*(\d+)", false),
];

const PO_FIELDS: &[FieldRule] = &[
    rule(
        "SPO Number",
        r"SPO\s*(?:No\.?|Number)?\s*[:\-]?\s*(\w[\w-]*)",
        true,
    ),
    rule(
        "Related RFQ Number",
        r"Related RFQ No\.?\s*[:\-]?\s*(\w[\w-]*)",
        true,
    ),
    rule("Agency", AGENCY, true),
    rule("Contracting Officer", r"Contracting Officer\s*[:\-]?\s*(.+)", true),
    rule("Email", EMAIL, true),
    rule(
        "Awarded Date",
        r"Awarded Date\s*[:\-]?\s*(\d{4}-\d{2}-\d{2})",
        false,
    ),
    rule("Line Items", LINE_ITEMS, false),
    rule("Attachments", r"Attachments\s*[:\-]?\s*(\d+)", false),
];

/// A field name paired with its compiled pattern.
type CompiledTable = Vec<(&'static str, Regex)>;

fn compile(rules: &[FieldRule]) -> CompiledTable {
    rules
        .iter()
        .map(|r| {
            let regex = RegexBuilder::new(r.pattern)
                .case_insensitive(r.case_insensitive)
                .build()
                .unwrap();
            (r.name, regex)
        })
        .collect()
}

static RFQ_TABLE: LazyLock<CompiledTable> = LazyLock::new(|| compile(RFQ_FIELDS));
static PO_TABLE: LazyLock<CompiledTable> = LazyLock::new(|| compile(PO_FIELDS));

fn table_for(doc_type: DocumentType) -> Option<&'static CompiledTable> {
    match doc_type {
        DocumentType::Rfq => Some(&*RFQ_TABLE),
        DocumentType::Po => Some(&*PO_TABLE),
        DocumentType::Delivery => None,
    }
}

/// Field names extracted for a document type, in report order.
pub fn field_names(doc_type: DocumentType) -> Vec<&'static str> {
    table_for(doc_type)
        .map(|table| table.iter().map(|(name, _)| *name).collect())
        .unwrap_or_default()
}

/// Apply the type's field table to `body`.
pub fn extract_fields(doc_type: DocumentType, body: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::new();
    let Some(table) = table_for(doc_type) else {
        return fields;
    };

    for (name, pattern) in table {
        let value = pattern
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        fields.push(*name, value);
    }
    fields
}
