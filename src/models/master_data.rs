// src/models/master_data.rs

use serde::{Deserialize, Serialize};

/// Valor selecionável vindo dos dados mestres (tags, tipos de documento...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterDataOption {
    pub value: String,
    pub label: String,
    pub color: Option<String>,
    pub tooltip: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsSort {
    #[default]
    Sequence,
    Label,
    Value,
}

/// Como transformar os registros brutos em opções.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsQuery {
    pub value_field: String,
    pub label_field: String,
    #[serde(default)]
    pub sort_by: OptionsSort,
}

impl Default for OptionsQuery {
    fn default() -> Self {
        Self {
            value_field: "sub_cat_name".to_string(),
            label_field: "display_name".to_string(),
            sort_by: OptionsSort::Sequence,
        }
    }
}

/// Estado repassado às seções: opções, carregamento e erro, sem alteração.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OptionsState {
    pub options: Vec<MasterDataOption>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OptionsState {
    pub fn ready(options: Vec<MasterDataOption>) -> Self {
        Self { options, loading: false, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { options: Vec::new(), loading: false, error: Some(error.into()) }
    }

    /// Só restringe valores quando a lista foi carregada com sucesso.
    pub fn restricts(&self) -> bool {
        !self.loading && self.error.is_none() && !self.options.is_empty()
    }

    pub fn permits(&self, value: &str) -> bool {
        !self.restricts() || self.find(value).is_some()
    }

    /// Busca sem diferenciar maiúsculas ("PAN" == "pan").
    pub fn find(&self, value: &str) -> Option<&MasterDataOption> {
        let value = value.trim();
        self.options.iter().find(|o| o.value.eq_ignore_ascii_case(value))
    }
}
