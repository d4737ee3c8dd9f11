// src/sections/mod.rs
//
// Editores de seção do rascunho (canais, endereços, documentos, pessoas,
// tags, classificações). Cada operação recebe a lista atual e devolve a
// lista completa seguinte, que o editor do registro grava no rascunho.

use serde::Deserialize;

use crate::common::error::AppError;
use crate::constants::{DEFAULT_MAX_TAGS, MAX_CONTACT_PERSONS};
use crate::models::contact::ContactDraft;
use crate::models::master_data::OptionsState;
use validator::ValidationErrors;

pub mod addresses;
pub mod channels;
pub mod classification;
pub mod compliance;
pub mod persons;
pub mod tags;

/// Limites configuráveis das seções.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLimits {
    pub max_tags: usize,
    pub max_persons: usize,
}

impl Default for SectionLimits {
    fn default() -> Self {
        Self { max_tags: DEFAULT_MAX_TAGS, max_persons: MAX_CONTACT_PERSONS }
    }
}

/// O que a seção recebe do editor pai além da lista.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub options: &'a OptionsState,
    pub limits: SectionLimits,
    pub disabled: bool,
}

impl<'a> SectionContext<'a> {
    pub fn new(options: &'a OptionsState, limits: SectionLimits) -> Self {
        Self { options, limits, disabled: false }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Um elemento de uma seção do rascunho.
pub trait SectionItem: Clone + std::fmt::Debug {
    type Patch;

    /// Nome da seção (logs e mensagens).
    const SECTION: &'static str;

    /// Se a seção mantém a regra de um único primário.
    const PRIMARY_CAPABLE: bool = false;

    /// Seções que só existem para contatos corporativos.
    const CORPORATE_ONLY: bool = false;

    /// Categoria de dados mestres que restringe os valores da seção.
    const OPTIONS_CATEGORY: Option<&'static str> = None;

    fn list(draft: &ContactDraft) -> &Vec<Self>;
    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self>;

    fn apply_patch(&mut self, patch: Self::Patch);
    fn validate(&self, ctx: &SectionContext<'_>) -> Result<(), ValidationErrors>;

    fn max_items(_limits: &SectionLimits) -> Option<usize> {
        None
    }

    fn assign_pending_id(&mut self) {}

    fn is_primary(&self) -> bool {
        false
    }

    fn set_primary(&mut self, _primary: bool) {}

    fn patch_sets_primary(_patch: &Self::Patch) -> bool {
        false
    }

    /// Chave de duplicidade dentro da lista; `None` quando a seção aceita repetidos.
    fn dedup_key(&self) -> Option<String> {
        None
    }

    /// Ajustes antes de validar (normalização, metadados dos dados mestres).
    fn prepare(&mut self, _ctx: &SectionContext<'_>) {}
}

/// Comando vindo da UI para uma seção.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SectionCommand<T, P> {
    Add { item: T },
    Update { index: usize, patch: P },
    Remove { index: usize },
}

pub fn apply_command<T: SectionItem>(
    value: &[T],
    command: SectionCommand<T, T::Patch>,
    ctx: &SectionContext<'_>,
) -> Result<Vec<T>, AppError> {
    match command {
        SectionCommand::Add { item } => add(value, item, ctx),
        SectionCommand::Update { index, patch } => update(value, index, patch, ctx),
        SectionCommand::Remove { index } => remove(value, index, ctx),
    }
}

pub fn add<T: SectionItem>(value: &[T], mut item: T, ctx: &SectionContext<'_>) -> Result<Vec<T>, AppError> {
    if ctx.disabled {
        return Err(AppError::SaveInProgress);
    }
    if let Some(max) = T::max_items(&ctx.limits) {
        if value.len() >= max {
            return Err(AppError::LimitReached { section: T::SECTION, max });
        }
    }

    item.prepare(ctx);
    item.validate(ctx).map_err(AppError::Validation)?;
    ensure_unique(value, &item, None)?;
    item.assign_pending_id();

    let mut next = value.to_vec();
    if T::PRIMARY_CAPABLE && item.is_primary() {
        next.iter_mut().for_each(|existing| existing.set_primary(false));
    }
    next.push(item);

    tracing::debug!(section = T::SECTION, len = next.len(), "item adicionado");
    Ok(next)
}

pub fn update<T: SectionItem>(
    value: &[T],
    index: usize,
    patch: T::Patch,
    ctx: &SectionContext<'_>,
) -> Result<Vec<T>, AppError> {
    if ctx.disabled {
        return Err(AppError::SaveInProgress);
    }
    let current = value
        .get(index)
        .ok_or(AppError::IndexOutOfRange { index, len: value.len() })?;

    let sets_primary = T::patch_sets_primary(&patch);
    let mut merged = current.clone();
    merged.apply_patch(patch);
    merged.prepare(ctx);
    merged.validate(ctx).map_err(AppError::Validation)?;
    ensure_unique(value, &merged, Some(index))?;

    let mut next = value.to_vec();
    if T::PRIMARY_CAPABLE && sets_primary {
        next.iter_mut().for_each(|existing| existing.set_primary(false));
    }
    next[index] = merged;

    tracing::debug!(section = T::SECTION, index, "item atualizado");
    Ok(next)
}

pub fn remove<T: SectionItem>(value: &[T], index: usize, ctx: &SectionContext<'_>) -> Result<Vec<T>, AppError> {
    if ctx.disabled {
        return Err(AppError::SaveInProgress);
    }
    if index >= value.len() {
        return Err(AppError::IndexOutOfRange { index, len: value.len() });
    }

    let was_primary = value[index].is_primary();
    let mut next: Vec<T> = value
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect();

    if T::PRIMARY_CAPABLE && was_primary {
        if let Some(first) = next.first_mut() {
            first.set_primary(true);
        }
    }

    tracing::debug!(section = T::SECTION, index, len = next.len(), "item removido");
    Ok(next)
}

/// Valida um item sem alterar a lista (validação no blur).
pub fn check<T: SectionItem>(mut item: T, ctx: &SectionContext<'_>) -> Result<(), AppError> {
    item.prepare(ctx);
    item.validate(ctx).map_err(AppError::Validation)
}

fn ensure_unique<T: SectionItem>(value: &[T], item: &T, skip: Option<usize>) -> Result<(), AppError> {
    let Some(key) = item.dedup_key() else {
        return Ok(());
    };
    let clash = value
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .any(|(_, existing)| existing.dedup_key().as_deref() == Some(key.as_str()));
    if clash {
        return Err(AppError::DuplicateItem(format!(
            "'{key}' already exists in {}",
            T::SECTION
        )));
    }
    Ok(())
}

/// Mantém no máximo um primário numa lista de canais aninhada (o primeiro marcado vence).
pub(crate) fn keep_first_primary<T: SectionItem>(items: &mut [T]) {
    let mut seen = false;
    for item in items.iter_mut() {
        if item.is_primary() {
            if seen {
                item.set_primary(false);
            }
            seen = true;
        }
    }
}
