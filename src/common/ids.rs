// src/common/ids.rs

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

static LAST_PENDING: AtomicU64 = AtomicU64::new(0);

/// Identificador de um sub-registro do rascunho.
///
/// `Persisted` vem do backend; `Pending` é gerado localmente para itens novos
/// e nunca é enviado na submissão.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum EntityId {
    Persisted(String),
    Pending(u64),
}

// O backend manda o id como string pura; a UI manda a forma etiquetada.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityIdRepr {
    Plain(String),
    Tagged(TaggedId),
}

#[derive(Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
enum TaggedId {
    Persisted(String),
    Pending(u64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match EntityIdRepr::deserialize(deserializer)? {
            EntityIdRepr::Plain(id) => EntityId::Persisted(id),
            EntityIdRepr::Tagged(TaggedId::Persisted(id)) => EntityId::Persisted(id),
            EntityIdRepr::Tagged(TaggedId::Pending(n)) => EntityId::Pending(n),
        })
    }
}

impl EntityId {
    /// Gera um id temporário baseado no relógio (ms), estritamente crescente no processo.
    pub fn pending() -> Self {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = LAST_PENDING.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match LAST_PENDING.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return EntityId::Pending(next),
                Err(current) => last = current,
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntityId::Pending(_))
    }

    /// O id durável, se houver. Ids pendentes somem aqui.
    pub fn persisted(&self) -> Option<&str> {
        match self {
            EntityId::Persisted(id) => Some(id),
            EntityId::Pending(_) => None,
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::pending()
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Persisted(id)
    }
}
