// src/validation/mod.rs
//
// Regras dos sub-registros. As regras fixas de cada campo estão nos atributos
// `#[validate(..)]` dos models; aqui ficam as funções `custom`, as checagens que
// dependem de contexto (dados mestres, tipo do documento) e a conversão dos
// `ValidationErrors` para o corpo das respostas.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub mod address;
pub mod channel;
pub mod classification;
pub mod compliance;
pub mod person;
pub mod tag;

pub use address::validate_address;
pub use channel::validate_channel;
pub use classification::validate_classification;
pub use compliance::validate_compliance;
pub use person::validate_person;
pub use tag::validate_tag;

// Parâmetro usado pelas validações de struct para apontar o campo certo.
const FIELD_PARAM: &str = "field";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", error.code)),
        }
    }
}

/// Achata os erros em `{ campo: { code, message } }`, com caminhos
/// aninhados (`contact_channels[0].value`). Só o primeiro erro de cada campo.
pub fn field_details(errors: &ValidationErrors) -> BTreeMap<String, FieldError> {
    let mut out = BTreeMap::new();
    collect_details("", errors, &mut out);
    out
}

fn collect_details(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, FieldError>) {
    let path = |name: &str| if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") };

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let name = error.params.get(FIELD_PARAM).and_then(Value::as_str).unwrap_or(&**field);
                    out.entry(path(name)).or_insert_with(|| FieldError::from(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_details(&path(&**field), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_details(&format!("{}[{index}]", path(&**field)), inner, out);
                }
            }
        }
    }
}

/// Primeira mensagem, para o toast.
pub fn first_message(errors: &ValidationErrors) -> Option<String> {
    field_details(errors).into_values().next().map(|e| e.message)
}

/// Problema do formulário inteiro (validateForm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FormIssue {
    pub fn new(field: &str, code: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

// --- Helpers comuns ---

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Erro de uma validação de struct preso a um campo.
pub(crate) fn on_field(mut err: ValidationError, field: &'static str) -> ValidationError {
    err.add_param(FIELD_PARAM.into(), &field);
    err
}

pub(crate) fn required() -> ValidationError {
    invalid("required", "This field is required")
}

// Usado por `custom(function = ..)` nos campos obrigatórios.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(required());
    }
    Ok(())
}

pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
pub(crate) fn code_of(errors: &ValidationErrors, field: &str) -> Option<String> {
    field_details(errors).get(field).map(|e| e.code.clone())
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::models::contact::{ContactChannel, ContactPerson};

    #[test]
    fn blank_is_required() {
        assert_eq!(not_blank("   ").unwrap_err().code, "required");
        assert!(not_blank("x").is_ok());
    }

    #[test]
    fn nested_errors_are_flattened_with_paths() {
        let person = ContactPerson {
            name: "Ravi Kumar".into(),
            contact_channels: vec![
                ContactChannel { channel_type: "email".into(), value: "ok@example.in".into(), ..Default::default() },
                ContactChannel { channel_type: "email".into(), value: "   ".into(), ..Default::default() },
            ],
            ..Default::default()
        };
        let errors = person.validate().unwrap_err();
        let details = field_details(&errors);
        assert_eq!(details["contact_channels[1].value"].code, "required");
        assert_eq!(details.len(), 1);
    }
}
