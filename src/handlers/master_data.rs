// src/handlers/master_data.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::RequestContext,
    models::master_data::{OptionsQuery, OptionsSort, OptionsState},
};

#[derive(Debug, Default, Deserialize)]
pub struct OptionsParams {
    pub value_field: Option<String>,
    pub label_field: Option<String>,
    pub sort_by: Option<OptionsSort>,
    #[serde(default)]
    pub refetch: bool,
}

impl OptionsParams {
    fn query(&self) -> OptionsQuery {
        let mut query = OptionsQuery::default();
        if let Some(field) = &self.value_field {
            query.value_field = field.clone();
        }
        if let Some(field) = &self.label_field {
            query.label_field = field.clone();
        }
        if let Some(sort_by) = self.sort_by {
            query.sort_by = sort_by;
        }
        query
    }
}

// GET /api/master-data/{category}
// Falhas do serviço vêm dentro do próprio OptionsState (campo `error`).
pub async fn get_options(
    State(app_state): State<AppState>,
    ctx: RequestContext,
    Path(category): Path<String>,
    Query(params): Query<OptionsParams>,
) -> Result<Json<OptionsState>, AppError> {
    let query = params.query();
    let state = if params.refetch {
        app_state.master_data.refetch(&ctx, &category, &query).await
    } else {
        app_state.master_data.options(&ctx, &category, &query).await
    };
    Ok(Json(state))
}
