// src/services/contact_gateway.rs

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    common::error::AppError,
    middleware::tenancy::RequestContext,
    models::contact::{
        ContactPayload, ContactRecord, ContactStatus, DuplicateCheck, DuplicateCriteria,
        InvitationReceipt, InvitationRequest, SavedContact,
    },
};

/// Colaborador de persistência dos contatos (a API REST do backend).
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn create_contact(&self, ctx: &RequestContext, payload: &ContactPayload) -> Result<SavedContact, AppError>;

    async fn update_contact(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        updates: &ContactPayload,
    ) -> Result<SavedContact, AppError>;

    async fn get_contact(&self, ctx: &RequestContext, contact_id: &str) -> Result<ContactRecord, AppError>;

    async fn check_duplicates(
        &self,
        ctx: &RequestContext,
        criteria: &DuplicateCriteria,
    ) -> Result<DuplicateCheck, AppError>;

    async fn send_invitation(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        request: &InvitationRequest,
    ) -> Result<InvitationReceipt, AppError>;

    async fn update_contact_status(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        status: ContactStatus,
    ) -> Result<SavedContact, AppError>;
}

#[derive(Clone)]
pub struct HttpContactGateway {
    http: HttpClient,
    base_url: String,
}

impl HttpContactGateway {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/contacts{}", self.base_url, path)
    }
}

// Cabeçalhos de tenant/ambiente/ator repassados ao backend.
pub(crate) fn with_context(req: RequestBuilder, ctx: &RequestContext) -> RequestBuilder {
    req.header("x-tenant-id", ctx.tenant_id.to_string())
        .header("x-actor-id", ctx.actor_id.to_string())
        .header("x-environment", ctx.environment.as_str())
}

/// Lê a resposta; aceita o corpo puro ou embrulhado em `{ "data": ... }`.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, AppError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AppError::Gateway(format!("HTTP {status}: {body}")));
    }
    let mut json: Value = resp.json().await?;
    if let Some(inner) = json.get_mut("data").map(Value::take) {
        if !inner.is_null() {
            json = inner;
        }
    }
    Ok(serde_json::from_value(json)?)
}

#[async_trait]
impl ContactGateway for HttpContactGateway {
    async fn create_contact(&self, ctx: &RequestContext, payload: &ContactPayload) -> Result<SavedContact, AppError> {
        let req = with_context(self.http.post(self.endpoint("")), ctx).json(payload);
        read_json(req.send().await?).await
    }

    async fn update_contact(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        updates: &ContactPayload,
    ) -> Result<SavedContact, AppError> {
        let req = with_context(self.http.patch(self.endpoint(&format!("/{contact_id}"))), ctx)
            .json(&json!({ "contactId": contact_id, "updates": updates }));
        read_json(req.send().await?).await
    }

    async fn get_contact(&self, ctx: &RequestContext, contact_id: &str) -> Result<ContactRecord, AppError> {
        let req = with_context(self.http.get(self.endpoint(&format!("/{contact_id}"))), ctx);
        read_json(req.send().await?).await
    }

    async fn check_duplicates(
        &self,
        ctx: &RequestContext,
        criteria: &DuplicateCriteria,
    ) -> Result<DuplicateCheck, AppError> {
        let req = with_context(self.http.post(self.endpoint("/duplicates")), ctx).json(criteria);
        read_json(req.send().await?).await
    }

    async fn send_invitation(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        request: &InvitationRequest,
    ) -> Result<InvitationReceipt, AppError> {
        let req = with_context(self.http.post(self.endpoint(&format!("/{contact_id}/invitations"))), ctx)
            .json(request);
        read_json(req.send().await?).await
    }

    async fn update_contact_status(
        &self,
        ctx: &RequestContext,
        contact_id: &str,
        status: ContactStatus,
    ) -> Result<SavedContact, AppError> {
        let req = with_context(self.http.patch(self.endpoint(&format!("/{contact_id}/status"))), ctx)
            .json(&json!({ "status": status }));
        read_json(req.send().await?).await
    }
}
