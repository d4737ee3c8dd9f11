// src/handlers/contacts.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    common::error::AppError,
    config::AppState,
    editor::{
        record_editor::{CancelOutcome, RecordEditor, SaveOutcome, UpdateOutcome},
        session::DraftView,
    },
    middleware::tenancy::RequestContext,
    models::{
        contact::{
            Address, Classification, ComplianceNumber, ContactChannel, ContactPerson, ContactStatus, ContactTag,
            FormPatch, InvitationRequest,
        },
        master_data::{OptionsQuery, OptionsState},
    },
    sections::{self, SectionCommand, SectionContext, SectionItem},
    services::notify::{Notifier, Toast, ToastBuffer},
    validation::{field_details, first_message, invalid},
};

// =============================================================================
//  RESPOSTAS
// =============================================================================

/// Erro de uma operação do editor, com os toasts gerados por ela.
#[derive(Debug)]
pub struct EditorFailure {
    pub error: AppError,
    pub toasts: Vec<Toast>,
}

impl From<AppError> for EditorFailure {
    fn from(error: AppError) -> Self {
        Self { error, toasts: Vec::new() }
    }
}

impl IntoResponse for EditorFailure {
    fn into_response(self) -> Response {
        let mut body = self.error.to_body();
        body["toasts"] = json!(self.toasts);
        (self.error.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    #[serde(flatten)]
    pub outcome: UpdateOutcome,
    pub view: DraftView,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub outcome: SaveOutcome,
    pub toasts: Vec<Toast>,
}

// Erros de seção também aparecem como toast.
fn toast_for(error: &AppError) -> Toast {
    match error {
        AppError::Validation(errors) => Toast::error(
            "Validation Error",
            first_message(errors).unwrap_or_else(|| "Please review the highlighted fields".to_string()),
        ),
        AppError::DuplicateItem(message) => Toast::error("Duplicate entry", message.clone()),
        AppError::LimitReached { max, .. } => Toast::warning("Limit reached", format!("You can add up to {max} items")),
        other => Toast::error("Error", other.to_string()),
    }
}

// =============================================================================
//  ÁREA 1: SESSÕES DE EDIÇÃO
// =============================================================================

// POST /api/contacts/drafts
pub async fn open_create_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let session_id = app_state.sessions.open(ctx.tenant_id, RecordEditor::new_create()).await;
    let today = Utc::now().date_naive();
    let view = app_state.sessions.with_session(session_id, ctx.tenant_id, |s| s.view(session_id, today)).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

// POST /api/contacts/{id}/drafts
pub async fn open_edit_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(contact_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state.contact_gateway.get_contact(&ctx, &contact_id).await.inspect_err(|e| {
        app_state.error_reporter.capture(e, "get_contact");
    })?;

    let session_id = app_state.sessions.open(ctx.tenant_id, RecordEditor::load_for_edit(record)).await;
    let today = Utc::now().date_naive();
    let view = app_state.sessions.with_session(session_id, ctx.tenant_id, |s| s.view(session_id, today)).await?;

    tracing::info!(%contact_id, %session_id, "rascunho de edição aberto");
    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/contacts/drafts/{sid}
pub async fn get_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DraftView>, AppError> {
    let today = Utc::now().date_naive();
    let view = app_state.sessions.with_session(session_id, ctx.tenant_id, |s| s.view(session_id, today)).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDraftPayload {
    #[serde(flatten)]
    pub patch: FormPatch,
    #[serde(default)]
    pub confirmed: bool,
}

// PATCH /api/contacts/drafts/{sid}
pub async fn update_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateDraftPayload>,
) -> Result<Json<UpdateResponse>, AppError> {
    let today = Utc::now().date_naive();

    let response = app_state
        .sessions
        .with_session(session_id, ctx.tenant_id, |s| {
            if s.saving {
                return Err(AppError::SaveInProgress);
            }
            let outcome = s.editor.update_form_data(payload.patch, payload.confirmed);
            tracing::debug!(%session_id, ?outcome, "formulário atualizado");
            Ok(UpdateResponse { outcome, view: s.view(session_id, today) })
        })
        .await??;

    Ok(Json(response))
}

// =============================================================================
//  ÁREA 2: SEÇÕES
// =============================================================================

async fn section_options<T: SectionItem>(app_state: &AppState, ctx: &RequestContext) -> Option<OptionsState> {
    match T::OPTIONS_CATEGORY {
        Some(category) => Some(app_state.master_data.options(ctx, category, &OptionsQuery::default()).await),
        None => None,
    }
}

// POST /api/contacts/drafts/{sid}/{section}
pub async fn section_command<T>(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<Uuid>,
    Json(command): Json<SectionCommand<T, T::Patch>>,
) -> Result<Json<DraftView>, EditorFailure>
where
    T: SectionItem + DeserializeOwned + Send + 'static,
    T::Patch: DeserializeOwned + Send + 'static,
{
    // Opções carregadas antes de pegar a trava da sessão
    let options = section_options::<T>(&app_state, &ctx).await;
    let limits = app_state.settings.limits();
    let today = Utc::now().date_naive();

    app_state
        .sessions
        .with_session(session_id, ctx.tenant_id, |s| {
            let empty = OptionsState::default();
            let section_ctx = SectionContext::new(options.as_ref().unwrap_or(&empty), limits).disabled(s.saving);

            match s.editor.apply_section::<T>(command, &section_ctx) {
                Ok(()) => {
                    let mut view = s.view(session_id, today);
                    view.options = options.clone();
                    Ok(Json(view))
                }
                Err(error) => {
                    tracing::debug!(section = T::SECTION, error = %error, "comando de seção rejeitado");
                    s.toasts.notify(toast_for(&error));
                    Err(EditorFailure { error, toasts: s.toasts.drain() })
                }
            }
        })
        .await?
}

async fn check_item<T>(app_state: &AppState, ctx: &RequestContext, body: Value) -> Result<Value, AppError>
where
    T: SectionItem + DeserializeOwned,
{
    let item: T = serde_json::from_value(body).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add(T::SECTION, invalid("invalid", e.to_string()));
        AppError::Validation(errors)
    })?;
    let options = section_options::<T>(app_state, ctx).await.unwrap_or_default();
    let section_ctx = SectionContext::new(&options, app_state.settings.limits());

    match sections::check(item, &section_ctx) {
        Ok(()) => Ok(json!({ "valid": true, "errors": {} })),
        Err(AppError::Validation(errors)) => Ok(json!({ "valid": false, "errors": field_details(&errors) })),
        Err(other) => Err(other),
    }
}

// POST /api/contacts/drafts/{sid}/validate/{section}
pub async fn validate_item(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path((session_id, section)): Path<(Uuid, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    // Só confirma que a sessão existe para este tenant.
    app_state.sessions.with_session(session_id, ctx.tenant_id, |_| ()).await?;

    let result = match section.as_str() {
        "channels" => check_item::<ContactChannel>(&app_state, &ctx, body).await?,
        "addresses" => check_item::<Address>(&app_state, &ctx, body).await?,
        "compliance" => check_item::<ComplianceNumber>(&app_state, &ctx, body).await?,
        "persons" => check_item::<ContactPerson>(&app_state, &ctx, body).await?,
        "tags" => check_item::<ContactTag>(&app_state, &ctx, body).await?,
        "classifications" => check_item::<Classification>(&app_state, &ctx, body).await?,
        other => return Err(AppError::UnknownSection(other.to_string())),
    };

    Ok(Json(result))
}

// =============================================================================
//  ÁREA 3: SALVAR / CANCELAR
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SaveQuery {
    #[serde(default)]
    pub force: bool,
}

// POST /api/contacts/drafts/{sid}/save
pub async fn save_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SaveQuery>,
) -> Result<Json<SaveResponse>, EditorFailure> {
    let mut editor = app_state.sessions.begin_save(session_id, ctx.tenant_id).await?;
    let mut toasts = ToastBuffer::default();

    // A trava da sessão não fica presa durante as chamadas de rede.
    let result = editor
        .handle_save(
            &ctx,
            app_state.contact_gateway.as_ref(),
            &mut toasts,
            app_state.error_reporter.as_ref(),
            query.force,
        )
        .await;

    let toasts = app_state.sessions.finish_save(session_id, ctx.tenant_id, editor, toasts.drain()).await?;

    match result {
        Ok(outcome) => Ok(Json(SaveResponse { outcome, toasts })),
        Err(error) => Err(EditorFailure { error, toasts }),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelQuery {
    #[serde(default)]
    pub confirmed: bool,
}

// POST /api/contacts/drafts/{sid}/cancel
pub async fn cancel_draft(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<Uuid>,
    Query(query): Query<CancelQuery>,
) -> Result<Json<CancelOutcome>, AppError> {
    let outcome = app_state
        .sessions
        .with_session(session_id, ctx.tenant_id, |s| {
            if s.saving {
                return Err(AppError::SaveInProgress);
            }
            Ok(s.editor.handle_cancel(query.confirmed))
        })
        .await??;

    if let CancelOutcome::Discarded { redirect } = &outcome {
        app_state.sessions.close(session_id, ctx.tenant_id).await?;
        tracing::info!(%session_id, %redirect, "rascunho descartado");
    }

    Ok(Json(outcome))
}

// =============================================================================
//  ÁREA 4: AÇÕES SOBRE CONTATOS SALVOS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: ContactStatus,
}

// PATCH /api/contacts/{id}/status
pub async fn update_status(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(contact_id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let saved = app_state
        .contact_gateway
        .update_contact_status(&ctx, &contact_id, payload.status)
        .await
        .inspect_err(|e| app_state.error_reporter.capture(e, "update_contact_status"))?;

    tracing::info!(%contact_id, status = ?payload.status, "status do contato alterado");
    Ok(Json(saved))
}

#[derive(Debug, Deserialize, Validate)]
pub struct InvitationPayload {
    #[validate(length(min = 1, max = 50, message = "Channel type is required"))]
    pub channel_type: String,

    #[validate(length(min = 1, max = 255, message = "Recipient is required"))]
    pub recipient: String,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

// POST /api/contacts/{id}/invitation
pub async fn send_invitation(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(contact_id): Path<String>,
    Json(payload): Json<InvitationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = InvitationRequest {
        channel_type: payload.channel_type.trim().to_lowercase(),
        recipient: payload.recipient.trim().to_string(),
        message: payload.message,
    };

    let receipt = app_state
        .contact_gateway
        .send_invitation(&ctx, &contact_id, &request)
        .await
        .inspect_err(|e| app_state.error_reporter.capture(e, "send_invitation"))?;

    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
