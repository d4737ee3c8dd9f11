// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use reqwest::Client as HttpClient;

use crate::{
    constants::{DEFAULT_GATE_DELAY_MS, DEFAULT_MAX_TAGS, DEFAULT_SESSION_IDLE_TTL_MINUTES, MAX_CONTACT_PERSONS},
    editor::session::SessionStore,
    sections::SectionLimits,
    services::{
        contact_gateway::{ContactGateway, HttpContactGateway},
        master_data::{HttpMasterDataSource, MasterDataOptions, MasterDataSource},
        notify::{ErrorReporter, TracingReporter},
    },
};

/// Configurações lidas do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub crm_api_base_url: String,
    pub master_data_base_url: String,
    pub http_timeout: Duration,
    pub max_tags: usize,
    pub gate_delay: Duration,
    pub session_idle_ttl: Duration,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().with_context(|| format!("{name} inválida: '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let crm_api_base_url = env::var("CRM_API_BASE_URL").context("CRM_API_BASE_URL deve ser definida")?;
        let master_data_base_url = env::var("MASTER_DATA_BASE_URL").unwrap_or_else(|_| crm_api_base_url.clone());

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            crm_api_base_url,
            master_data_base_url,
            http_timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS", 10u64)?),
            max_tags: parse_var("MAX_TAGS", DEFAULT_MAX_TAGS)?,
            gate_delay: Duration::from_millis(parse_var("GATE_DELAY_MS", DEFAULT_GATE_DELAY_MS)?),
            session_idle_ttl: Duration::from_secs(
                parse_var("SESSION_IDLE_TTL_MINUTES", DEFAULT_SESSION_IDLE_TTL_MINUTES)? * 60,
            ),
        })
    }

    pub fn limits(&self) -> SectionLimits {
        SectionLimits { max_tags: self.max_tags, max_persons: MAX_CONTACT_PERSONS }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            crm_api_base_url: "http://localhost:8080/api".to_string(),
            master_data_base_url: "http://localhost:8080/api".to_string(),
            http_timeout: Duration::from_secs(10),
            max_tags: DEFAULT_MAX_TAGS,
            gate_delay: Duration::from_millis(DEFAULT_GATE_DELAY_MS),
            session_idle_ttl: Duration::from_secs(DEFAULT_SESSION_IDLE_TTL_MINUTES * 60),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub contact_gateway: Arc<dyn ContactGateway>,
    pub master_data: MasterDataOptions,
    pub error_reporter: Arc<dyn ErrorReporter>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;

        let http = HttpClient::builder()
            .timeout(settings.http_timeout)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        // --- Monta o gráfico de dependências ---
        let gateway = HttpContactGateway::new(http.clone(), &settings.crm_api_base_url);
        let master_data = HttpMasterDataSource::new(http, &settings.master_data_base_url);

        tracing::info!(crm = %settings.crm_api_base_url, master_data = %settings.master_data_base_url, "✅ Colaboradores configurados");

        Ok(Self::with_collaborators(
            settings,
            Arc::new(gateway),
            Arc::new(master_data),
            Arc::new(TracingReporter),
        ))
    }

    /// Monta o estado com colaboradores arbitrários (dublês nos testes).
    pub fn with_collaborators(
        settings: Settings,
        contact_gateway: Arc<dyn ContactGateway>,
        master_data_source: Arc<dyn MasterDataSource>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let sessions = SessionStore::with_idle_ttl(settings.session_idle_ttl);
        Self {
            settings: Arc::new(settings),
            contact_gateway,
            master_data: MasterDataOptions::new(master_data_source),
            error_reporter,
            sessions,
        }
    }
}
