// tests/api.rs
//
// Testes do router completo com colaboradores em memória.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use contact_editor::{
    build_router,
    common::error::AppError,
    config::{AppState, Settings},
    middleware::tenancy::RequestContext,
    models::contact::{
        ContactDraft, ContactPayload, ContactRecord, ContactStatus, DuplicateCheck, DuplicateCriteria,
        InvitationReceipt, InvitationRequest, SavedContact,
    },
    services::{contact_gateway::ContactGateway, master_data::MasterDataSource, notify::TracingReporter},
};

#[derive(Default)]
struct MemoryGateway {
    created: Mutex<Vec<ContactPayload>>,
    statuses: Mutex<Vec<(String, ContactStatus)>>,
    fail_save: bool,
}

#[async_trait]
impl ContactGateway for MemoryGateway {
    async fn create_contact(&self, _ctx: &RequestContext, payload: &ContactPayload) -> Result<SavedContact, AppError> {
        if self.fail_save {
            return Err(AppError::Gateway("HTTP 503".into()));
        }
        self.created.lock().unwrap().push(payload.clone());
        Ok(SavedContact { id: "c-42".into() })
    }

    async fn update_contact(
        &self,
        _ctx: &RequestContext,
        contact_id: &str,
        _payload: &ContactPayload,
    ) -> Result<SavedContact, AppError> {
        Ok(SavedContact { id: contact_id.to_string() })
    }

    async fn get_contact(&self, _ctx: &RequestContext, contact_id: &str) -> Result<ContactRecord, AppError> {
        let mut draft = ContactDraft::empty();
        draft.name = "Ravi Kumar".into();
        Ok(ContactRecord { id: contact_id.to_string(), draft })
    }

    async fn check_duplicates(&self, _ctx: &RequestContext, _c: &DuplicateCriteria) -> Result<DuplicateCheck, AppError> {
        Ok(DuplicateCheck::default())
    }

    async fn send_invitation(
        &self,
        _ctx: &RequestContext,
        _contact_id: &str,
        _request: &InvitationRequest,
    ) -> Result<InvitationReceipt, AppError> {
        Ok(InvitationReceipt { invitation_id: "inv-1".into(), status: Some("sent".into()) })
    }

    async fn update_contact_status(
        &self,
        _ctx: &RequestContext,
        contact_id: &str,
        status: ContactStatus,
    ) -> Result<SavedContact, AppError> {
        self.statuses.lock().unwrap().push((contact_id.to_string(), status));
        Ok(SavedContact { id: contact_id.to_string() })
    }
}

struct StaticMasterData;

#[async_trait]
impl MasterDataSource for StaticMasterData {
    async fn fetch_category(&self, _ctx: &RequestContext, category: &str) -> Result<Vec<Value>, AppError> {
        match category {
            "contact_tags" => Ok(vec![
                json!({ "sub_cat_name": "vip", "display_name": "VIP", "hexcolor": "#FFAA00", "sequence_no": 1 }),
                json!({ "sub_cat_name": "old", "display_name": "Old", "is_active": false }),
            ]),
            _ => Err(AppError::Gateway("HTTP 500".into())),
        }
    }
}

fn app_with(gateway: MemoryGateway) -> (Router, Arc<MemoryGateway>) {
    let gateway = Arc::new(gateway);
    let settings = Settings { gate_delay: Duration::ZERO, ..Settings::default() };
    let state = AppState::with_collaborators(
        settings,
        gateway.clone(),
        Arc::new(StaticMasterData),
        Arc::new(TracingReporter),
    );
    (build_router(state), gateway)
}

fn app() -> (Router, Arc<MemoryGateway>) {
    app_with(MemoryGateway::default())
}

struct Tenant {
    tenant_id: Uuid,
    actor_id: Uuid,
}

impl Tenant {
    fn new() -> Self {
        Self { tenant_id: Uuid::new_v4(), actor_id: Uuid::new_v4() }
    }

    fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-tenant-id", self.tenant_id.to_string())
            .header("x-actor-id", self.actor_id.to_string())
            .header("x-environment", "test");
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, body)
}

async fn open_draft(app: &Router, tenant: &Tenant) -> String {
    let (status, body) = send(app, tenant.request("POST", "/api/contacts/drafts", None)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn drafts_require_tenant_headers() {
    let (app, _) = app();
    let request = Request::builder().method("POST").uri("/api/contacts/drafts").body(Body::empty()).unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("x-tenant-id"));
}

#[tokio::test]
async fn create_flow_saves_and_redirects() {
    let (app, gateway) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let base = format!("/api/contacts/drafts/{sid}");

    let (status, body) = send(&app, tenant.request("PATCH", &base, Some(json!({ "name": "Asha Reddy" })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["view"]["has_unsaved_changes"], true);

    let (status, _) = send(
        &app,
        tenant.request(
            "POST",
            &format!("{base}/classifications"),
            Some(json!({ "op": "add", "item": { "value": "customer" } })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        tenant.request(
            "POST",
            &format!("{base}/channels"),
            Some(json!({ "op": "add", "item": { "channel_type": "email", "value": "Asha@Example.in" } })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["contact_channels"][0]["value"], "asha@example.in");
    assert_eq!(body["draft"]["contact_channels"][0]["id"]["state"], "pending");

    let (status, body) = send(&app, tenant.request("POST", &format!("{base}/save"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "saved");
    assert_eq!(body["redirect"], "/contacts/c-42");
    assert_eq!(body["toasts"][0]["level"], "success");

    let created = gateway.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].tenant_id, tenant.tenant_id);
    assert!(!created[0].is_live);
    assert_eq!(created[0].contact_channels[0].id, None);
}

#[tokio::test]
async fn incomplete_form_is_rejected_with_toasts() {
    let (app, gateway) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;

    let (status, body) = send(&app, tenant.request("POST", &format!("/api/contacts/drafts/{sid}/save"), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 3);
    assert_eq!(body["toasts"].as_array().unwrap().len(), 3);
    assert!(gateway.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_save_keeps_the_draft() {
    let (app, _) = app_with(MemoryGateway { fail_save: true, ..Default::default() });
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let base = format!("/api/contacts/drafts/{sid}");

    send(&app, tenant.request("PATCH", &base, Some(json!({ "name": "Asha Reddy" })))).await;
    send(
        &app,
        tenant.request("POST", &format!("{base}/classifications"), Some(json!({ "op": "add", "item": { "value": "vendor" } }))),
    )
    .await;
    send(
        &app,
        tenant.request(
            "POST",
            &format!("{base}/channels"),
            Some(json!({ "op": "add", "item": { "channel_type": "mobile", "value": "98765 43210", "country_code": "+91" } })),
        ),
    )
    .await;

    let (status, body) = send(&app, tenant.request("POST", &format!("{base}/save"), None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["toasts"][0]["level"], "error");

    let (status, view) = send(&app, tenant.request("GET", &base, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["mode"], "create");
    assert_eq!(view["draft"]["name"], "Asha Reddy");
    assert_eq!(view["saving"], false);
}

#[tokio::test]
async fn tags_are_restricted_to_the_catalog() {
    let (app, _) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let tags = format!("/api/contacts/drafts/{sid}/tags");

    let (status, body) = send(&app, tenant.request("POST", &tags, Some(json!({ "op": "add", "item": { "tag_value": "vip" } })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["tags"][0]["tag_label"], "VIP");
    assert_eq!(body["draft"]["tags"][0]["tag_color"], "#FFAA00");
    assert_eq!(body["options"]["options"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, tenant.request("POST", &tags, Some(json!({ "op": "add", "item": { "tag_value": "vip" } })))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["toasts"][0]["title"], "Duplicate entry");

    let (status, _) = send(&app, tenant.request("POST", &tags, Some(json!({ "op": "add", "item": { "tag_value": "old" } })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn persons_only_apply_to_corporate_contacts() {
    let (app, _) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let persons = format!("/api/contacts/drafts/{sid}/persons");
    let person = json!({ "op": "add", "item": { "name": "Meena Iyer", "is_primary": true } });

    let (status, _) = send(&app, tenant.request("POST", &persons, Some(person.clone()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(
        &app,
        tenant.request("PATCH", &format!("/api/contacts/drafts/{sid}"), Some(json!({ "type": "corporate" }))),
    )
    .await;
    assert_eq!(body["outcome"], "applied");

    let (status, body) = send(&app, tenant.request("POST", &persons, Some(person))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["contact_persons"][0]["is_primary"], true);
}

#[tokio::test]
async fn blur_validation_reports_field_errors() {
    let (app, _) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;

    let (status, body) = send(
        &app,
        tenant.request(
            "POST",
            &format!("/api/contacts/drafts/{sid}/validate/channels"),
            Some(json!({ "channel_type": "email", "value": "not-an-email" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert!(body["errors"]["value"].is_object());

    let (status, _) = send(
        &app,
        tenant.request("POST", &format!("/api/contacts/drafts/{sid}/validate/unknown"), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_asks_for_confirmation_when_dirty() {
    let (app, _) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let base = format!("/api/contacts/drafts/{sid}");

    send(&app, tenant.request("PATCH", &base, Some(json!({ "notes": "call back" })))).await;

    let (_, body) = send(&app, tenant.request("POST", &format!("{base}/cancel"), None)).await;
    assert_eq!(body["outcome"], "confirmation_required");

    let (_, body) = send(&app, tenant.request("POST", &format!("{base}/cancel?confirmed=true"), None)).await;
    assert_eq!(body["outcome"], "discarded");
    assert_eq!(body["redirect"], "/contacts");

    let (status, _) = send(&app, tenant.request("GET", &base, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dirty_type_switch_needs_confirmation() {
    let (app, _) = app();
    let tenant = Tenant::new();
    let sid = open_draft(&app, &tenant).await;
    let base = format!("/api/contacts/drafts/{sid}");

    send(&app, tenant.request("PATCH", &base, Some(json!({ "name": "Asha Reddy" })))).await;

    let (status, body) = send(&app, tenant.request("PATCH", &base, Some(json!({ "type": "corporate" })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "confirmation_required");
    assert_eq!(body["view"]["draft"]["type"], "individual");
    assert_eq!(body["view"]["draft"]["name"], "Asha Reddy");

    let (status, body) = send(
        &app,
        tenant.request("PATCH", &base, Some(json!({ "type": "corporate", "confirmed": true }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "applied");
    assert_eq!(body["view"]["draft"]["type"], "corporate");
    assert_eq!(body["view"]["draft"]["name"], "");
}

#[tokio::test]
async fn status_change_goes_to_the_gateway() {
    let (app, gateway) = app();
    let tenant = Tenant::new();

    let (status, body) = send(
        &app,
        tenant.request("PATCH", "/api/contacts/c-9/status", Some(json!({ "status": "inactive" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "c-9");
    assert_eq!(*gateway.statuses.lock().unwrap(), vec![("c-9".to_string(), ContactStatus::Inactive)]);

    let (status, _) = send(
        &app,
        tenant.request("PATCH", "/api/contacts/c-9/status", Some(json!({ "status": "deleted" }))),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn sessions_are_invisible_to_other_tenants() {
    let (app, _) = app();
    let owner = Tenant::new();
    let sid = open_draft(&app, &owner).await;

    let (status, _) = send(&app, Tenant::new().request("GET", &format!("/api/contacts/drafts/{sid}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_session_loads_the_contact() {
    let (app, _) = app();
    let tenant = Tenant::new();

    let (status, body) = send(&app, tenant.request("POST", "/api/contacts/c-7/drafts", None)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mode"], "edit");
    assert_eq!(body["contact_id"], "c-7");
    assert_eq!(body["draft"]["name"], "Ravi Kumar");
    assert_eq!(body["has_unsaved_changes"], false);
}

#[tokio::test]
async fn master_data_failures_are_passed_through() {
    let (app, _) = app();
    let tenant = Tenant::new();

    let (status, body) = send(&app, tenant.request("GET", "/api/master-data/compliance_types", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["options"].as_array().unwrap().is_empty());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn invitation_payload_is_validated() {
    let (app, _) = app();
    let tenant = Tenant::new();

    let (status, _) = send(
        &app,
        tenant.request("POST", "/api/contacts/c-1/invitation", Some(json!({ "channel_type": "email", "recipient": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        tenant.request(
            "POST",
            "/api/contacts/c-1/invitation",
            Some(json!({ "channel_type": "email", "recipient": "asha@example.in" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["invitation_id"], "inv-1");
}

#[tokio::test]
async fn gate_grants_the_branch_for_the_right_password() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/community/gate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "password": "BAGYANAGAR" }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "granted");
    assert_eq!(body["redirect"], "/community/bagyanagar");
}

#[tokio::test]
async fn gate_denies_a_wrong_password() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/community/gate")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "password": "secret" }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["outcome"], "denied");
    assert_eq!(body["state"], "idle");
    assert_eq!(body["toasts"][0]["level"], "error");
}
