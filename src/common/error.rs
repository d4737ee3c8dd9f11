// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::validation::{field_details, FormIssue};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    // Erros do `validator`, tanto dos payloads das rotas quanto dos itens das seções
    #[error("Um ou mais campos são inválidos")]
    Validation(#[from] validator::ValidationErrors),

    // Falhas do validateForm (antes de salvar)
    #[error("O formulário contém {} problema(s)", .0.len())]
    FormInvalid(Vec<FormIssue>),

    #[error("{0}")]
    DuplicateItem(String),

    #[error("Limite de {max} itens atingido em '{section}'")]
    LimitReached { section: &'static str, max: usize },

    #[error("Índice {index} fora do intervalo (tamanho {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0}")]
    NotApplicable(String),

    #[error("Um salvamento já está em andamento")]
    SaveInProgress,

    #[error("Sessão de edição não encontrada")]
    SessionNotFound,

    #[error("Seção desconhecida: {0}")]
    UnknownSection(String),

    #[error("Cabeçalho inválido: {0}")]
    InvalidHeader(String),

    // Falhas dos colaboradores externos (API de contatos, dados mestres)
    #[error("Falha no serviço externo: {0}")]
    Gateway(String),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::FormInvalid(_)
            | AppError::LimitReached { .. }
            | AppError::IndexOutOfRange { .. }
            | AppError::NotApplicable(_)
            | AppError::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateItem(_) | AppError::SaveInProgress => StatusCode::CONFLICT,
            AppError::SessionNotFound | AppError::UnknownSection(_) => StatusCode::NOT_FOUND,
            AppError::Gateway(_) | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Erro simples usado como rejeição dos extratores.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl AppError {
    /// Corpo JSON do erro. Erros de colaboradores e internos são logados
    /// aqui e respondidos de forma genérica.
    pub fn to_body(&self) -> Value {
        match self {
            AppError::Validation(errors) => json!({
                "error": "Um ou mais campos são inválidos.",
                "details": field_details(errors),
            }),
            AppError::FormInvalid(issues) => json!({
                "error": "O formulário não pode ser salvo.",
                "details": issues,
            }),
            AppError::Gateway(_)
            | AppError::Http(_)
            | AppError::Json(_)
            | AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                json!({ "error": "Ocorreu um erro inesperado. Tente novamente." })
            }
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}
