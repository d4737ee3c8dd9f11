// src/validation/channel.rs

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use super::{invalid, is_blank, on_field, required};
use crate::constants::{CHANNEL_TYPES, PHONE_CHANNEL_TYPES, PHONE_DIGITS, WEBSITE};
use crate::models::contact::ContactChannel;

/// Remove a pontuação usual de telefones ("98 765-43.210" -> "9876543210").
pub fn normalize_phone(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

pub fn is_phone_channel(channel_type: &str) -> bool {
    PHONE_CHANNEL_TYPES.contains(&channel_type)
}

pub fn known_channel_type(value: &str) -> Result<(), ValidationError> {
    let channel_type = value.trim();
    if channel_type.is_empty() {
        return Err(required());
    }
    if !CHANNEL_TYPES.contains(&channel_type) {
        return Err(invalid("unknown_type", format!("Unknown channel type '{channel_type}'")));
    }
    Ok(())
}

// O formato do valor depende do tipo do canal.
pub fn validate_channel_value(channel: &ContactChannel) -> Result<(), ValidationError> {
    let value = channel.value.trim();
    if is_blank(value) {
        return Ok(());
    }

    let err = match channel.channel_type.trim() {
        "email" if !value.validate_email() => invalid("invalid_email", "Please enter a valid email address"),
        t if is_phone_channel(t) && !PHONE_DIGITS.is_match(&normalize_phone(value)) => {
            invalid("invalid_phone", "Phone number must have 7 to 15 digits")
        }
        "website" if !WEBSITE.is_match(value) => invalid("invalid_url", "Please enter a valid website URL"),
        _ => return Ok(()),
    };
    Err(on_field(err, "value"))
}

pub fn validate_channel(channel: &ContactChannel) -> Result<(), ValidationErrors> {
    channel.validate()
}
