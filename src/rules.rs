//! Label mapping and field-extraction rule tables.
//!
//! The classifier is a general-purpose image model whose label set never
//! names identity documents directly, so the mapping is substring-based.
//! Field extraction scans OCR text line by line against per-type trigger
//! tables; when several lines match the same field, the last one in the
//! text wins.

use std::collections::BTreeMap;

use crate::models::{DocumentType, FieldMap};

/// Placeholder value for any field no line matched. Part of the output
/// contract, not an error signal.
pub const UNKNOWN: &str = "Unknown";

/// Maps a free-text classifier label to a document type.
///
/// First match wins. Unrecognized labels fall back to `Passport` rather
/// than an error.
pub fn classify_label(top_label: &str) -> DocumentType {
    let label = top_label.to_lowercase();
    if label.contains("passport") {
        DocumentType::Passport
    } else if label.contains("license") || label.contains("id") {
        DocumentType::DriverLicense
    } else if label.contains("card") {
        DocumentType::EadCard
    } else {
        DocumentType::Passport
    }
}

/// One extraction rule: the target field and the lower-cased substrings
/// that mark a line as its source.
struct FieldRule {
    field: &'static str,
    triggers: &'static [&'static str],
}

/// Passport rules. `passport_no`, `first_name` and `last_name` are scratch
/// fields: scanned, but only used to synthesize `full_name`; they do not
/// appear in the output map.
const PASSPORT_RULES: &[FieldRule] = &[
    FieldRule {
        field: "passport_no",
        triggers: &["passport no", "passport number"],
    },
    FieldRule {
        field: "last_name",
        triggers: &["surname", "last name"],
    },
    FieldRule {
        field: "first_name",
        triggers: &["given name", "first name"],
    },
    FieldRule {
        field: "full_name",
        triggers: &["name:"],
    },
    FieldRule {
        field: "date_of_birth",
        triggers: &["dob:", "date of birth:"],
    },
    FieldRule {
        field: "country",
        triggers: &["country:"],
    },
    FieldRule {
        field: "issue_date",
        triggers: &["issue date:"],
    },
    FieldRule {
        field: "expiration_date",
        triggers: &["expiry date:", "expiration date:"],
    },
];

const PASSPORT_OUTPUT: &[&str] = &[
    "full_name",
    "date_of_birth",
    "country",
    "issue_date",
    "expiration_date",
];

const DRIVER_LICENSE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "license_number",
        triggers: &["license no", "license #"],
    },
    FieldRule {
        field: "first_name",
        triggers: &["first name"],
    },
    FieldRule {
        field: "last_name",
        triggers: &["last name"],
    },
    FieldRule {
        field: "date_of_birth",
        triggers: &["dob:", "date of birth:"],
    },
    FieldRule {
        field: "issue_date",
        triggers: &["issue date:"],
    },
    FieldRule {
        field: "expiration_date",
        triggers: &["exp date:", "expiration date:"],
    },
];

const DRIVER_LICENSE_OUTPUT: &[&str] = &[
    "license_number",
    "first_name",
    "last_name",
    "date_of_birth",
    "issue_date",
    "expiration_date",
];

const EAD_CARD_RULES: &[FieldRule] = &[
    FieldRule {
        field: "card_number",
        triggers: &["card number:"],
    },
    FieldRule {
        field: "category",
        triggers: &["category:"],
    },
    FieldRule {
        field: "card_expires_date",
        triggers: &["expires:", "card expires:"],
    },
    FieldRule {
        field: "first_name",
        triggers: &["first name:"],
    },
    FieldRule {
        field: "last_name",
        triggers: &["last name:"],
    },
];

const EAD_CARD_OUTPUT: &[&str] = &[
    "card_number",
    "category",
    "card_expires_date",
    "first_name",
    "last_name",
];

/// Extracts the per-type field map from raw OCR text.
///
/// Rules are checked independently per line, so one line can feed several
/// fields (a `"Last Name:"` line also carries the `"name:"` trigger).
/// Never fails: empty or unmatched text yields all placeholders.
pub fn extract_fields(doc_type: DocumentType, text: &str) -> FieldMap {
    let (rules, output) = match doc_type {
        DocumentType::Passport => (PASSPORT_RULES, PASSPORT_OUTPUT),
        DocumentType::DriverLicense => (DRIVER_LICENSE_RULES, DRIVER_LICENSE_OUTPUT),
        DocumentType::EadCard => (EAD_CARD_RULES, EAD_CARD_OUTPUT),
    };

    let mut values: BTreeMap<&'static str, String> = rules
        .iter()
        .map(|rule| (rule.field, UNKNOWN.to_string()))
        .collect();

    for line in text.split('\n') {
        let lowered = line.to_lowercase();
        for rule in rules {
            if rule.triggers.iter().any(|t| lowered.contains(t)) {
                values.insert(rule.field, value_after_colon(line));
            }
        }
        if doc_type == DocumentType::Passport {
            synthesize_full_name(&mut values);
        }
    }

    output
        .iter()
        .map(|&field| {
            let value = values.remove(field).unwrap_or_else(|| UNKNOWN.to_string());
            (field.to_string(), value)
        })
        .collect()
}

/// Everything after the first colon, trimmed. A line without a colon yields
/// the whole line trimmed.
fn value_after_colon(line: &str) -> String {
    line.splitn(2, ':').last().unwrap_or(line).trim().to_string()
}

/// Recomputed after every scanned line, not once at the end. The comparison
/// is case-sensitive while the placeholder is capitalized, so it only fires
/// when a name line itself reads "unknown"; the concatenation has no
/// separator.
fn synthesize_full_name(values: &mut BTreeMap<&'static str, String>) {
    if values.get("full_name").map(String::as_str) == Some("unknown") {
        let first = values
            .get("first_name")
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        let last = values
            .get("last_name")
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        values.insert("full_name", format!("{}{}", first, last));
    }
}
