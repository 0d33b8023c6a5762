//! Property-based tests for the classification and extraction rules.
//!
//! Classification must be total and case-insensitive; extraction must be
//! total over arbitrary text and always produce exactly the per-type field
//! set.

use proptest::prelude::*;

use crate::models::DocumentType;
use crate::rules::{classify_label, extract_fields};

fn expected_keys(doc_type: DocumentType) -> Vec<&'static str> {
    // Sorted, since FieldMap iterates in key order.
    match doc_type {
        DocumentType::Passport => vec![
            "country",
            "date_of_birth",
            "expiration_date",
            "full_name",
            "issue_date",
        ],
        DocumentType::DriverLicense => vec![
            "date_of_birth",
            "expiration_date",
            "first_name",
            "issue_date",
            "last_name",
            "license_number",
        ],
        DocumentType::EadCard => vec![
            "card_expires_date",
            "card_number",
            "category",
            "first_name",
            "last_name",
        ],
    }
}

proptest! {
    #[test]
    fn any_label_containing_passport_maps_to_passport(
        prefix in "[a-zA-Z ]{0,12}",
        suffix in "[a-zA-Z ]{0,12}",
    ) {
        let label = format!("{}PaSsPoRt{}", prefix, suffix);
        prop_assert_eq!(classify_label(&label), DocumentType::Passport);
    }

    #[test]
    fn license_labels_without_passport_map_to_driver_license(
        prefix in "[a-z ]{0,8}",
        suffix in "[a-z ]{0,8}",
    ) {
        let label = format!("{}license{}", prefix, suffix);
        prop_assume!(!label.contains("passport"));
        prop_assert_eq!(classify_label(&label), DocumentType::DriverLicense);
    }

    #[test]
    fn labels_without_any_trigger_fall_back_to_passport(label in "[a-z ]{0,16}") {
        prop_assume!(
            !label.contains("passport")
                && !label.contains("license")
                && !label.contains("id")
                && !label.contains("card")
        );
        prop_assert_eq!(classify_label(&label), DocumentType::Passport);
    }

    #[test]
    fn extraction_is_total_and_keys_are_fixed(
        lines in prop::collection::vec("[ -~]{0,40}", 0..8),
    ) {
        let text = lines.join("\n");
        for doc_type in [
            DocumentType::Passport,
            DocumentType::DriverLicense,
            DocumentType::EadCard,
        ] {
            let fields = extract_fields(doc_type, &text);
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            prop_assert_eq!(keys, expected_keys(doc_type));
        }
    }

    #[test]
    fn extracted_values_carry_no_surrounding_whitespace(
        lines in prop::collection::vec("[ -~]{0,40}", 0..8),
    ) {
        let text = lines.join("\n");
        for doc_type in [
            DocumentType::Passport,
            DocumentType::DriverLicense,
            DocumentType::EadCard,
        ] {
            for value in extract_fields(doc_type, &text).values() {
                prop_assert_eq!(value.as_str(), value.trim());
            }
        }
    }
}
