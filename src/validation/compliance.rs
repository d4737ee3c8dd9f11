// src/validation/compliance.rs

use validator::{Validate, ValidationErrors};

use super::{into_result, invalid, is_blank};
use crate::constants::{GENERIC_COMPLIANCE_NUMBER, GSTIN_NUMBER, PAN_NUMBER};
use crate::models::contact::ComplianceNumber;
use crate::models::master_data::OptionsState;

/// Obrigatórios vêm do derive; o resto depende do tipo e do catálogo.
pub fn validate_compliance(doc: &ComplianceNumber, types: &OptionsState) -> Result<(), ValidationErrors> {
    let mut errors = doc.validate().err().unwrap_or_else(ValidationErrors::new);
    let type_value = doc.type_value.trim();

    if !is_blank(type_value) && !types.permits(type_value) {
        errors.add("type_value", invalid("unknown_type", format!("Unknown compliance type '{type_value}'")));
    }

    if !is_blank(&doc.number) {
        let number = doc.number.trim().to_uppercase();
        let (pattern, message) = match type_value.to_lowercase().as_str() {
            "pan" => (&*PAN_NUMBER, "PAN must look like ABCDE1234F"),
            "gstin" | "gst" => (&*GSTIN_NUMBER, "GSTIN must be 15 characters, e.g. 27AAPFU0939F1ZV"),
            _ => (&*GENERIC_COMPLIANCE_NUMBER, "Number may contain 2 to 50 letters, digits, '-' or '/'"),
        };
        if !pattern.is_match(&number) {
            errors.add("number", invalid("invalid_format", message));
        }
    }

    if let (Some(from), Some(to)) = (doc.valid_from, doc.valid_to) {
        if to < from {
            errors.add("valid_to", invalid("invalid_range", "Valid to must not be before valid from"));
        }
    }

    into_result(errors)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::master_data::MasterDataOption;
    use crate::validation::code_of;

    fn doc(type_value: &str, number: &str) -> ComplianceNumber {
        ComplianceNumber {
            type_value: type_value.into(),
            number: number.into(),
            ..Default::default()
        }
    }

    fn types(values: &[&str]) -> OptionsState {
        OptionsState::ready(
            values
                .iter()
                .map(|v| MasterDataOption {
                    value: v.to_string(),
                    label: v.to_uppercase(),
                    color: None,
                    tooltip: None,
                    sequence_no: None,
                })
                .collect(),
        )
    }

    #[test]
    fn pan_and_gstin_formats() {
        let none = OptionsState::default();
        assert!(validate_compliance(&doc("pan", "abcde1234f"), &none).is_ok());
        assert!(validate_compliance(&doc("gstin", "27AAPFU0939F1ZV"), &none).is_ok());
        let errors = validate_compliance(&doc("pan", "ABC123"), &none).unwrap_err();
        assert_eq!(code_of(&errors, "number").as_deref(), Some("invalid_format"));
    }

    #[test]
    fn type_must_exist_when_options_loaded() {
        let errors = validate_compliance(&doc("cin", "U12345"), &types(&["pan", "gstin"])).unwrap_err();
        assert_eq!(code_of(&errors, "type_value").as_deref(), Some("unknown_type"));
    }

    #[test]
    fn upper_case_catalog_accepts_any_spelling() {
        let catalog = types(&["PAN", "GSTIN"]);
        assert!(validate_compliance(&doc("pan", "ABCDE1234F"), &catalog).is_ok());
        assert!(validate_compliance(&doc("PAN", "ABCDE1234F"), &catalog).is_ok());
    }

    #[test]
    fn failed_lookup_does_not_restrict_types() {
        let failed = OptionsState::failed("timeout");
        assert!(validate_compliance(&doc("cin", "U12345MH2000"), &failed).is_ok());
    }

    #[test]
    fn validity_range_is_checked() {
        let mut d = doc("msme", "UDYAM-MH-01-0000001");
        d.valid_from = NaiveDate::from_ymd_opt(2026, 5, 1);
        d.valid_to = NaiveDate::from_ymd_opt(2026, 4, 1);
        let errors = validate_compliance(&d, &OptionsState::default()).unwrap_err();
        assert_eq!(code_of(&errors, "valid_to").as_deref(), Some("invalid_range"));
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_compliance(&doc(" ", ""), &OptionsState::default()).unwrap_err();
        assert_eq!(code_of(&errors, "type_value").as_deref(), Some("required"));
        assert_eq!(code_of(&errors, "number").as_deref(), Some("required"));
    }
}
