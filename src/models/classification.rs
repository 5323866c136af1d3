//! Classification and field-extraction result models.

use serde::{Serialize, Serializer};

/// Sentinel value for a field whose pattern did not match.
pub const NOT_AVAILABLE: &str = "N/A";

/// Document types the classifier can identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Rfq,
    Po,
    Delivery,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfq => "rfq",
            Self::Po => "po",
            Self::Delivery => "delivery",
        }
    }

    /// Label used in the classification section of the report.
    pub fn flag_label(&self) -> &'static str {
        match self {
            Self::Rfq => "IsRFQ",
            Self::Po => "IsPO",
            Self::Delivery => "IsDelivery",
        }
    }
}

/// Outcome of keyword classification. At most one flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub is_rfq: bool,
    pub is_po: bool,
    pub is_delivery: bool,
}

impl ClassificationResult {
    /// Result with only the flag for `doc_type` set.
    pub fn only(doc_type: DocumentType) -> Self {
        let mut result = Self::default();
        match doc_type {
            DocumentType::Rfq => result.is_rfq = true,
            DocumentType::Po => result.is_po = true,
            DocumentType::Delivery => result.is_delivery = true,
        }
        result
    }

    /// The type whose flag is set, if any.
    pub fn primary(&self) -> Option<DocumentType> {
        self.flags()
            .into_iter()
            .find_map(|(doc_type, set)| set.then_some(doc_type))
    }

    /// All three flags in display order.
    pub fn flags(&self) -> [(DocumentType, bool); 3] {
        [
            (DocumentType::Rfq, self.is_rfq),
            (DocumentType::Po, self.is_po),
            (DocumentType::Delivery, self.is_delivery),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }
}

/// Ordered field name to value mapping produced by the field extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    entries: Vec<(&'static str, String)>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: Option<&str>) {
        let value = value
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as an ordered list of name/value pairs.
impl Serialize for ExtractedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Field<'a> {
            name: &'a str,
            value: &'a str,
        }
        serializer.collect_seq(self.iter().map(|(name, value)| Field { name, value }))
    }
}
