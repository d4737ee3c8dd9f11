// src/validation/person.rs

use validator::{Validate, ValidationError, ValidationErrors};

use super::invalid;
use crate::constants::SALUTATIONS;
use crate::models::contact::ContactPerson;

// "Dr." e "dr" valem o mesmo; vazio é aceito.
pub fn known_salutation(value: &str) -> Result<(), ValidationError> {
    let salutation = value.trim();
    let normalized = salutation.trim_end_matches('.').to_lowercase();
    if !salutation.is_empty() && !SALUTATIONS.contains(&normalized.as_str()) {
        return Err(invalid("unknown_salutation", format!("Unknown salutation '{salutation}'")));
    }
    Ok(())
}

/// Inclui os canais aninhados (`#[validate(nested)]`).
pub fn validate_person(person: &ContactPerson) -> Result<(), ValidationErrors> {
    person.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::ContactChannel;
    use crate::validation::code_of;

    #[test]
    fn name_length_bounds() {
        let mut p = ContactPerson { name: "A".into(), ..Default::default() };
        assert_eq!(code_of(&validate_person(&p).unwrap_err(), "name").as_deref(), Some("length"));
        p.name = "Anita Rao".into();
        p.salutation = Some("Dr.".into());
        assert!(validate_person(&p).is_ok());
        p.salutation = Some("Sir".into());
        assert_eq!(code_of(&validate_person(&p).unwrap_err(), "salutation").as_deref(), Some("unknown_salutation"));
    }

    #[test]
    fn nested_channels_are_validated() {
        let p = ContactPerson {
            name: "Ravi Kumar".into(),
            contact_channels: vec![ContactChannel {
                channel_type: "email".into(),
                value: "broken@".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let errors = validate_person(&p).unwrap_err();
        assert_eq!(code_of(&errors, "contact_channels[0].value").as_deref(), Some("invalid_email"));
    }
}
