// src/services/master_data.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::RequestContext,
    models::master_data::{MasterDataOption, OptionsQuery, OptionsSort, OptionsState},
    services::contact_gateway::{read_json, with_context},
};

/// Colaborador de dados mestres: devolve os registros brutos de uma categoria.
#[async_trait]
pub trait MasterDataSource: Send + Sync {
    async fn fetch_category(&self, ctx: &RequestContext, category: &str) -> Result<Vec<Value>, AppError>;
}

#[derive(Clone)]
pub struct HttpMasterDataSource {
    http: HttpClient,
    base_url: String,
}

impl HttpMasterDataSource {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl MasterDataSource for HttpMasterDataSource {
    async fn fetch_category(&self, ctx: &RequestContext, category: &str) -> Result<Vec<Value>, AppError> {
        let endpoint = format!("{}/master-data/{}", self.base_url, category);
        let req = with_context(self.http.get(&endpoint), ctx);
        read_json(req.send().await?).await
    }
}

fn text_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Converte registros brutos em opções (campos de valor/rótulo configuráveis).
/// Registros inativos ou sem valor são descartados.
pub fn to_options(records: &[Value], query: &OptionsQuery) -> Vec<MasterDataOption> {
    let mut options: Vec<MasterDataOption> = records
        .iter()
        .filter(|r| r.get("is_active").and_then(Value::as_bool).unwrap_or(true))
        .filter_map(|r| {
            let value = text_field(r, &[query.value_field.as_str()])?;
            let label = text_field(r, &[query.label_field.as_str()]).unwrap_or_else(|| value.clone());
            Some(MasterDataOption {
                value,
                label,
                color: text_field(r, &["hexcolor", "color", "tag_color"]),
                tooltip: text_field(r, &["tooltip", "description"]),
                sequence_no: r.get("sequence_no").and_then(Value::as_i64).map(|n| n as i32),
            })
        })
        .collect();

    match query.sort_by {
        OptionsSort::Sequence => options.sort_by_key(|o| (o.sequence_no.unwrap_or(i32::MAX), o.label.clone())),
        OptionsSort::Label => options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase())),
        OptionsSort::Value => options.sort_by(|a, b| a.value.cmp(&b.value)),
    }
    options
}

type CacheKey = (Uuid, String);

/// Opções por categoria com cache por tenant (o `useMasterDataOptions` do editor).
/// O cache guarda os registros brutos; cada chamada aplica a sua própria `OptionsQuery`.
#[derive(Clone)]
pub struct MasterDataOptions {
    source: Arc<dyn MasterDataSource>,
    cache: Arc<RwLock<HashMap<CacheKey, Arc<Vec<Value>>>>>,
}

impl MasterDataOptions {
    pub fn new(source: Arc<dyn MasterDataSource>) -> Self {
        Self { source, cache: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Falhas viram `OptionsState` com erro; o editor repassa esse estado sem alterar.
    pub async fn options(&self, ctx: &RequestContext, category: &str, query: &OptionsQuery) -> OptionsState {
        let key = (ctx.tenant_id, category.to_string());
        let cached = self.cache.read().await.get(&key).cloned();
        if let Some(records) = cached {
            return OptionsState::ready(to_options(&records, query));
        }

        match self.source.fetch_category(ctx, category).await {
            Ok(records) => {
                let options = to_options(&records, query);
                tracing::debug!(category, count = options.len(), "dados mestres carregados");
                self.cache.write().await.insert(key, Arc::new(records));
                OptionsState::ready(options)
            }
            Err(e) => {
                tracing::warn!(category, error = %e, "falha ao carregar dados mestres");
                OptionsState::failed(format!("Could not load {category} options"))
            }
        }
    }

    pub async fn refetch(&self, ctx: &RequestContext, category: &str, query: &OptionsQuery) -> OptionsState {
        self.cache.write().await.remove(&(ctx.tenant_id, category.to_string()));
        self.options(ctx, category, query).await
    }
}
