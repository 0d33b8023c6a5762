//! Core domain types for document extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification tag assigned to an uploaded identity document.
///
/// Closed set: anything the classifier produces is mapped onto one of these
/// three tags by [`crate::rules::classify_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    DriverLicense,
    EadCard,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::DriverLicense => "driver_license",
            Self::EadCard => "ead_card",
        }
    }

    /// Parses a stored tag. Returns `None` for anything outside the set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "passport" => Some(Self::Passport),
            "driver_license" => Some(Self::DriverLicense),
            "ead_card" => Some(Self::EadCard),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named field values extracted from a document's text, keyed by field name.
///
/// The field-name set is fixed per [`DocumentType`]; values the scanner never
/// matched hold the `"Unknown"` placeholder.
pub type FieldMap = BTreeMap<String, String>;

/// The persisted unit of work: one classified document and its fields.
///
/// `document_type` is immutable after creation; updates replace the whole
/// field map and nothing else. Records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub id: i64,
    pub document_type: DocumentType,
    pub fields: FieldMap,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_tags_roundtrip() {
        for doc_type in [
            DocumentType::Passport,
            DocumentType::DriverLicense,
            DocumentType::EadCard,
        ] {
            assert_eq!(DocumentType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocumentType::parse("visa"), None);
    }

    #[test]
    fn document_type_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentType::DriverLicense).unwrap();
        assert_eq!(json, "\"driver_license\"");
        let json = serde_json::to_string(&DocumentType::EadCard).unwrap();
        assert_eq!(json, "\"ead_card\"");
    }
}
