// src/handlers/gate.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    editor::gate::{GateModal, GateOutcome},
    services::notify::ToastBuffer,
};

#[derive(Debug, Deserialize, Validate)]
pub struct GatePayload {
    #[validate(length(max = 128, message = "Password is too long"))]
    pub password: String,
}

// POST /api/community/gate
pub async fn verify_gate(
    State(app_state): State<AppState>,
    Json(payload): Json<GatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut gate = GateModal::new(app_state.settings.gate_delay);
    let mut toasts = ToastBuffer::default();

    let outcome = gate
        .submit(&payload.password, &mut toasts, |branch| {
            tracing::info!(branch, "portão da comunidade liberado");
        })
        .await;

    let status = match outcome {
        GateOutcome::Granted { .. } => StatusCode::OK,
        GateOutcome::Denied { .. } => {
            tracing::info!("senha do portão incorreta");
            StatusCode::UNAUTHORIZED
        }
    };

    let mut body = json!(outcome);
    body["toasts"] = json!(toasts.drain());
    Ok((status, Json(body)))
}
