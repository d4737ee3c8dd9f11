// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::ApiError;

// Os nomes dos nossos cabeçalhos HTTP customizados
const TENANT_ID_HEADER: &str = "x-tenant-id";
const ACTOR_ID_HEADER: &str = "x-actor-id";
const ENVIRONMENT_HEADER: &str = "x-environment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Live,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Live => "live",
            Environment::Test => "test",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Live)
    }
}

/// Tenant, ambiente e ator da requisição, passados explicitamente
/// a todas as operações que falam com os colaboradores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant_id: Uuid,
    pub actor_id: Uuid,
    pub environment: Environment,
}

fn bad_request(message: String) -> ApiError {
    ApiError { status: StatusCode::BAD_REQUEST, message }
}

fn uuid_header(parts: &Parts, name: &str) -> Result<Uuid, ApiError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| bad_request(format!("O cabeçalho {name} é obrigatório.")))?;

    let value_str = value
        .to_str()
        .map_err(|_| bad_request(format!("Cabeçalho {name} contém caracteres inválidos.")))?;

    Uuid::parse_str(value_str).map_err(|_| bad_request(format!("Cabeçalho {name} inválido (não é um UUID).")))
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    // Usamos ApiError como rejeição, pois ele já implementa IntoResponse
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = uuid_header(parts, TENANT_ID_HEADER)?;
        let actor_id = uuid_header(parts, ACTOR_ID_HEADER)?;

        // Sem cabeçalho de ambiente, assume produção
        let environment = match parts.headers.get(ENVIRONMENT_HEADER).and_then(|v| v.to_str().ok()) {
            None => Environment::Live,
            Some(v) if v.eq_ignore_ascii_case("live") => Environment::Live,
            Some(v) if v.eq_ignore_ascii_case("test") => Environment::Test,
            Some(other) => {
                return Err(bad_request(format!("Ambiente desconhecido em {ENVIRONMENT_HEADER}: '{other}'.")));
            }
        };

        Ok(RequestContext { tenant_id, actor_id, environment })
    }
}
