// src/validation/tag.rs

use validator::{Validate, ValidationErrors};

use super::{into_result, invalid, is_blank};
use crate::models::contact::ContactTag;
use crate::models::master_data::OptionsState;

pub fn validate_tag(tag: &ContactTag, allowed: &OptionsState) -> Result<(), ValidationErrors> {
    let mut errors = tag.validate().err().unwrap_or_else(ValidationErrors::new);

    let value = tag.tag_value.trim();
    if !is_blank(value) && !allowed.permits(value) {
        errors.add("tag_value", invalid("unknown_tag", format!("Tag '{value}' is not available")));
    }

    into_result(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::master_data::MasterDataOption;
    use crate::validation::code_of;

    #[test]
    fn color_must_be_hex() {
        let tag = ContactTag {
            tag_value: "vip".into(),
            tag_label: "VIP".into(),
            tag_color: Some("red".into()),
            ..Default::default()
        };
        let errors = validate_tag(&tag, &OptionsState::default()).unwrap_err();
        assert_eq!(code_of(&errors, "tag_color").as_deref(), Some("invalid_color"));
    }

    #[test]
    fn empty_value_is_required() {
        let errors = validate_tag(&ContactTag::default(), &OptionsState::default()).unwrap_err();
        assert_eq!(code_of(&errors, "tag_value").as_deref(), Some("required"));
    }

    #[test]
    fn catalog_membership_ignores_case() {
        let catalog = OptionsState::ready(vec![MasterDataOption {
            value: "VIP".into(),
            label: "VIP".into(),
            color: None,
            tooltip: None,
            sequence_no: None,
        }]);
        let tag = ContactTag { tag_value: "vip".into(), ..Default::default() };
        assert!(validate_tag(&tag, &catalog).is_ok());
        let other = ContactTag { tag_value: "retail".into(), ..Default::default() };
        assert_eq!(code_of(&validate_tag(&other, &catalog).unwrap_err(), "tag_value").as_deref(), Some("unknown_tag"));
    }
}
