// src/editor/session.rs

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    constants::DEFAULT_SESSION_IDLE_TTL_MINUTES,
    editor::record_editor::{EditorMode, RecordEditor},
    models::{
        contact::{ContactDraft, ExpiryStatus},
        master_data::OptionsState,
    },
    services::notify::{Notifier, Toast, ToastBuffer},
    validation::FormIssue,
};

/// Um editor aberto: rascunho, toasts pendentes e a trava de salvamento.
#[derive(Debug)]
pub struct EditorSession {
    pub tenant_id: Uuid,
    pub editor: RecordEditor,
    pub toasts: ToastBuffer,
    pub saving: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DraftView {
    pub session_id: Uuid,
    pub mode: EditorMode,
    pub contact_id: Option<String>,
    pub draft: ContactDraft,
    pub has_unsaved_changes: bool,
    pub saving: bool,
    pub errors: Vec<FormIssue>,
    pub compliance_status: Vec<ExpiryStatus>,
    /// Opções da seção alterada, repassadas sem alteração.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsState>,
    pub toasts: Vec<Toast>,
}

impl EditorSession {
    /// Monta a visão para a UI e entrega os toasts acumulados.
    pub fn view(&mut self, session_id: Uuid, today: NaiveDate) -> DraftView {
        let draft = self.editor.draft().clone();
        DraftView {
            session_id,
            mode: self.editor.mode(),
            contact_id: self.editor.contact_id().map(str::to_owned),
            has_unsaved_changes: self.editor.has_unsaved_changes(),
            saving: self.saving,
            errors: self.editor.errors().to_vec(),
            compliance_status: draft.compliance_numbers.iter().map(|c| c.expiry_status(today)).collect(),
            draft,
            options: None,
            toasts: self.toasts.drain(),
        }
    }
}

impl EditorSession {
    // Sessão salvando nunca expira; o salvamento a libera ao terminar.
    fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.saving && (now - self.updated_at).to_std().is_ok_and(|idle| idle > ttl)
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, EditorSession>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(Duration::from_secs(DEFAULT_SESSION_IDLE_TTL_MINUTES * 60))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self { inner: Arc::default(), idle_ttl }
    }

    /// Descarta sessões sem uso há mais que o TTL. Devolve quantas saíram.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.idle_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "sessões ociosas descartadas");
        }
        evicted
    }

    /// Varredura periódica das sessões ociosas (roda até o processo terminar).
    pub fn spawn_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                store.evict_idle(Utc::now()).await;
            }
        })
    }

    pub async fn open(&self, tenant_id: Uuid, editor: RecordEditor) -> Uuid {
        self.evict_idle(Utc::now()).await;
        let session_id = Uuid::new_v4();
        let session = EditorSession {
            tenant_id,
            editor,
            toasts: ToastBuffer::default(),
            saving: false,
            updated_at: Utc::now(),
        };
        self.inner.write().await.insert(session_id, session);
        tracing::debug!(%session_id, %tenant_id, "sessão de edição aberta");
        session_id
    }

    /// Executa `f` sobre a sessão. Sessões de outro tenant não existem para quem pergunta.
    pub async fn with_session<R>(
        &self,
        session_id: Uuid,
        tenant_id: Uuid,
        f: impl FnOnce(&mut EditorSession) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&session_id)
            .filter(|s| s.tenant_id == tenant_id)
            .ok_or(AppError::SessionNotFound)?;
        session.updated_at = Utc::now();
        Ok(f(session))
    }

    /// Marca a sessão como salvando e devolve uma cópia do editor para
    /// a chamada de rede, que roda sem segurar a trava.
    pub async fn begin_save(&self, session_id: Uuid, tenant_id: Uuid) -> Result<RecordEditor, AppError> {
        self.with_session(session_id, tenant_id, |session| {
            if session.saving {
                return Err(AppError::SaveInProgress);
            }
            session.saving = true;
            Ok(session.editor.clone())
        })
        .await?
    }

    /// Devolve o editor (salvo ou não), libera a sessão e entrega os toasts pendentes.
    pub async fn finish_save(
        &self,
        session_id: Uuid,
        tenant_id: Uuid,
        editor: RecordEditor,
        toasts: Vec<Toast>,
    ) -> Result<Vec<Toast>, AppError> {
        self.with_session(session_id, tenant_id, |session| {
            session.editor = editor;
            session.saving = false;
            for toast in toasts {
                session.toasts.notify(toast);
            }
            session.toasts.drain()
        })
        .await
    }

    pub async fn close(&self, session_id: Uuid, tenant_id: Uuid) -> Result<EditorSession, AppError> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&session_id) {
            Some(s) if s.tenant_id == tenant_id => {}
            _ => return Err(AppError::SessionNotFound),
        }
        sessions.remove(&session_id).ok_or(AppError::SessionNotFound)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
