// src/validation/address.rs

use validator::{Validate, ValidationError, ValidationErrors};

use super::{invalid, required};
use crate::constants::ADDRESS_TYPES;
use crate::models::contact::Address;

pub fn known_address_type(value: &str) -> Result<(), ValidationError> {
    let address_type = value.trim();
    if address_type.is_empty() {
        return Err(required());
    }
    if !ADDRESS_TYPES.contains(&address_type) {
        return Err(invalid("unknown_type", format!("Unknown address type '{address_type}'")));
    }
    Ok(())
}

pub fn validate_address(address: &Address) -> Result<(), ValidationErrors> {
    address.validate()
}
