// src/validation/classification.rs

use validator::{Validate, ValidationError, ValidationErrors};

use super::{invalid, required};
use crate::constants::CLASSIFICATIONS;
use crate::models::contact::Classification;

pub fn known_classification(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(required());
    }
    if !CLASSIFICATIONS.contains(&value) {
        return Err(invalid("unknown_classification", format!("Unknown classification '{value}'")));
    }
    Ok(())
}

pub fn validate_classification(classification: &Classification) -> Result<(), ValidationErrors> {
    classification.validate()
}
