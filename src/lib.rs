// src/lib.rs

use axum::{
    routing::{get, patch, post},
    Router,
};

pub mod common;
pub mod config;
pub mod constants;
pub mod editor;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod sections;
pub mod services;
pub mod validation;

use crate::config::AppState;
use crate::handlers::contacts::section_command;
use crate::models::contact::{Address, Classification, ComplianceNumber, ContactChannel, ContactPerson, ContactTag};

/// Monta o router completo. Usado pelo `main` e pelos testes de integração.
pub fn build_router(app_state: AppState) -> Router {
    // Sessões de edição (rascunhos)
    let draft_routes = Router::new()
        .route("/", post(handlers::contacts::open_create_draft))
        .route(
            "/{sid}",
            get(handlers::contacts::get_draft).patch(handlers::contacts::update_draft),
        )
        .route("/{sid}/channels", post(section_command::<ContactChannel>))
        .route("/{sid}/addresses", post(section_command::<Address>))
        .route("/{sid}/compliance", post(section_command::<ComplianceNumber>))
        .route("/{sid}/persons", post(section_command::<ContactPerson>))
        .route("/{sid}/tags", post(section_command::<ContactTag>))
        .route("/{sid}/classifications", post(section_command::<Classification>))
        .route("/{sid}/validate/{section}", post(handlers::contacts::validate_item))
        .route("/{sid}/save", post(handlers::contacts::save_draft))
        .route("/{sid}/cancel", post(handlers::contacts::cancel_draft));

    // Contatos já salvos
    let contact_routes = Router::new()
        .route("/{id}/drafts", post(handlers::contacts::open_edit_draft))
        .route("/{id}/status", patch(handlers::contacts::update_status))
        .route("/{id}/invitation", post(handlers::contacts::send_invitation));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/contacts/drafts", draft_routes)
        .nest("/api/contacts", contact_routes)
        .route("/api/master-data/{category}", get(handlers::master_data::get_options))
        .route("/api/community/gate", post(handlers::gate::verify_gate))
        .with_state(app_state)
}
