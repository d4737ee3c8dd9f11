// src/editor/record_editor.rs

use anyhow::anyhow;
use serde::Serialize;

use crate::{
    common::error::AppError,
    middleware::tenancy::RequestContext,
    models::contact::{
        AddressPayload, ChannelPayload, CompliancePayload, ContactDraft, ContactPayload,
        ContactRecord, ContactType, DuplicateCriteria, DuplicateMatch, FormPatch, PersonPayload,
        TagPayload,
    },
    sections::{self, SectionCommand, SectionContext, SectionItem},
    services::{
        contact_gateway::ContactGateway,
        notify::{ErrorReporter, Notifier, Toast},
    },
    validation::{channel::is_phone_channel, channel::normalize_phone, is_blank, FormIssue},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Applied,
    /// Troca de tipo com alterações pendentes: nada foi aplicado.
    ConfirmationRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved { id: String, redirect: String },
    /// Aviso não bloqueante: reenviar com `force` para salvar mesmo assim.
    DuplicatesFound { duplicates: Vec<DuplicateMatch> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CancelOutcome {
    ConfirmationRequired,
    Discarded { redirect: String },
}

/// Dono do rascunho inteiro: estado sujo, validação e montagem do payload.
#[derive(Debug, Clone)]
pub struct RecordEditor {
    mode: EditorMode,
    contact_id: Option<String>,
    draft: ContactDraft,
    initial: ContactDraft,
    errors: Vec<FormIssue>,
}

impl RecordEditor {
    pub fn new_create() -> Self {
        Self {
            mode: EditorMode::Create,
            contact_id: None,
            draft: ContactDraft::empty(),
            initial: ContactDraft::empty(),
            errors: Vec::new(),
        }
    }

    pub fn load_for_edit(record: ContactRecord) -> Self {
        Self {
            mode: EditorMode::Edit,
            contact_id: Some(record.id),
            initial: record.draft.clone(),
            draft: record.draft,
            errors: Vec::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn errors(&self) -> &[FormIssue] {
        &self.errors
    }

    /// Comparação rasa com o rascunho carregado: campos primitivos
    /// e tamanho das listas (não compara o conteúdo das listas).
    pub fn has_unsaved_changes(&self) -> bool {
        let (a, b) = (&self.draft, &self.initial);
        a.contact_type != b.contact_type
            || a.status != b.status
            || a.salutation != b.salutation
            || a.name != b.name
            || a.company_name != b.company_name
            || a.notes != b.notes
            || a.classifications.len() != b.classifications.len()
            || a.contact_channels.len() != b.contact_channels.len()
            || a.addresses.len() != b.addresses.len()
            || a.compliance_numbers.len() != b.compliance_numbers.len()
            || a.contact_persons.len() != b.contact_persons.len()
            || a.tags.len() != b.tags.len()
    }

    pub fn update_form_data(&mut self, patch: FormPatch, confirmed: bool) -> UpdateOutcome {
        if let Some(new_type) = patch.contact_type {
            if new_type != self.draft.contact_type {
                if self.has_unsaved_changes() && !confirmed {
                    tracing::debug!(?new_type, "troca de tipo aguardando confirmação");
                    return UpdateOutcome::ConfirmationRequired;
                }
                self.reset_type_specific(new_type);
            }
        }

        if let Some(status) = patch.status {
            self.draft.status = status;
        }
        if let Some(salutation) = patch.salutation {
            self.draft.salutation = Some(salutation);
        }
        if let Some(name) = patch.name {
            self.draft.name = name;
        }
        if let Some(company_name) = patch.company_name {
            self.draft.company_name = company_name;
        }
        if let Some(notes) = patch.notes {
            self.draft.notes = notes;
        }

        UpdateOutcome::Applied
    }

    // Campos que só fazem sentido para um dos tipos.
    fn reset_type_specific(&mut self, new_type: ContactType) {
        self.draft.contact_type = new_type;
        self.draft.salutation = None;
        self.draft.name.clear();
        self.draft.company_name.clear();
        self.draft.contact_persons.clear();
    }

    /// Aplica um comando de seção e grava a lista resultante no rascunho.
    pub fn apply_section<T: SectionItem>(
        &mut self,
        command: SectionCommand<T, T::Patch>,
        ctx: &SectionContext<'_>,
    ) -> Result<(), AppError> {
        if T::CORPORATE_ONLY && self.draft.contact_type != ContactType::Corporate {
            return Err(AppError::NotApplicable(format!(
                "'{}' is only available for corporate contacts",
                T::SECTION
            )));
        }
        let next = sections::apply_command(T::list(&self.draft), command, ctx)?;
        *T::list_mut(&mut self.draft) = next;
        Ok(())
    }

    /// Valida o formulário inteiro; cada problema vira um toast de erro.
    pub fn validate_form(&mut self, notifier: &mut dyn Notifier) -> bool {
        let draft = &self.draft;
        let mut issues = Vec::new();

        if draft.classifications.is_empty() {
            issues.push(FormIssue::new(
                "classifications",
                "required",
                "Please select at least one classification",
            ));
        }
        match draft.contact_type {
            ContactType::Individual if is_blank(&draft.name) => {
                issues.push(FormIssue::new("name", "required", "Name is required for individual contacts"));
            }
            ContactType::Corporate if is_blank(&draft.company_name) => {
                issues.push(FormIssue::new(
                    "company_name",
                    "required",
                    "Company name is required for corporate contacts",
                ));
            }
            _ => {}
        }
        if draft.contact_channels.is_empty() {
            issues.push(FormIssue::new(
                "contact_channels",
                "required",
                "At least one contact channel is required",
            ));
        }

        for issue in &issues {
            notifier.notify(Toast::error("Validation Error", issue.message.clone()));
        }
        self.errors = issues;
        self.errors.is_empty()
    }

    pub fn build_payload(&self, ctx: &RequestContext) -> ContactPayload {
        let d = &self.draft;
        let (name, company_name) = match d.contact_type {
            ContactType::Individual => (Some(d.name.trim().to_string()), None),
            ContactType::Corporate => (None, Some(d.company_name.trim().to_string())),
        };
        let (created_by, updated_by) = match self.mode {
            EditorMode::Create => (Some(ctx.actor_id), None),
            EditorMode::Edit => (None, Some(ctx.actor_id)),
        };

        ContactPayload {
            tenant_id: ctx.tenant_id,
            is_live: ctx.environment.is_live(),
            created_by,
            updated_by,
            contact_type: d.contact_type,
            status: d.status,
            classifications: d.classifications.iter().map(|c| c.value.clone()).collect(),
            salutation: d.salutation.clone(),
            name,
            company_name,
            contact_channels: d.contact_channels.iter().map(ChannelPayload::from).collect(),
            addresses: d.addresses.iter().map(AddressPayload::from).collect(),
            compliance_numbers: d.compliance_numbers.iter().map(CompliancePayload::from).collect(),
            contact_persons: d.contact_persons.iter().map(PersonPayload::from).collect(),
            tags: d.tags.iter().map(TagPayload::from).collect(),
            notes: (!is_blank(&d.notes)).then(|| d.notes.trim().to_string()),
        }
    }

    pub fn duplicate_criteria(&self, ctx: &RequestContext) -> DuplicateCriteria {
        let d = &self.draft;
        let channel_values = |pred: fn(&str) -> bool| -> Vec<String> {
            d.contact_channels
                .iter()
                .filter(|c| pred(&c.channel_type))
                .map(|c| c.value.trim().to_string())
                .collect()
        };

        DuplicateCriteria {
            tenant_id: ctx.tenant_id,
            contact_type: d.contact_type,
            name: (d.contact_type == ContactType::Individual).then(|| d.name.trim().to_string()),
            company_name: (d.contact_type == ContactType::Corporate).then(|| d.company_name.trim().to_string()),
            emails: channel_values(|t| t == "email"),
            phones: channel_values(is_phone_channel).iter().map(|p| normalize_phone(p)).collect(),
        }
    }

    pub async fn handle_save(
        &mut self,
        ctx: &RequestContext,
        gateway: &dyn ContactGateway,
        notifier: &mut dyn Notifier,
        reporter: &dyn ErrorReporter,
        force: bool,
    ) -> Result<SaveOutcome, AppError> {
        if !self.validate_form(notifier) {
            return Err(AppError::FormInvalid(self.errors.clone()));
        }

        let payload = self.build_payload(ctx);

        if self.mode == EditorMode::Create && !force {
            match gateway.check_duplicates(ctx, &self.duplicate_criteria(ctx)).await {
                Ok(check) if check.has_duplicates => {
                    notifier.notify(Toast::warning(
                        "Possible duplicates",
                        format!("{} similar contact(s) already exist", check.duplicates.len()),
                    ));
                    tracing::info!(count = check.duplicates.len(), "duplicidades encontradas, aguardando confirmação");
                    return Ok(SaveOutcome::DuplicatesFound { duplicates: check.duplicates });
                }
                Ok(_) => {}
                // A verificação é só um aviso: se falhar, segue com o salvamento.
                Err(e) => {
                    reporter.capture(&e, "check_duplicates");
                }
            }
        }

        let result = match self.mode {
            EditorMode::Create => gateway.create_contact(ctx, &payload).await,
            EditorMode::Edit => {
                let contact_id = self
                    .contact_id
                    .clone()
                    .ok_or_else(|| AppError::InternalServerError(anyhow!("edição sem id de contato")))?;
                gateway.update_contact(ctx, &contact_id, &payload).await
            }
        };

        match result {
            Ok(saved) => {
                let created = self.mode == EditorMode::Create;
                self.mark_saved(saved.id.clone());
                notifier.notify(Toast::success(
                    if created { "Contact created" } else { "Contact updated" },
                    "Your changes have been saved",
                ));
                tracing::info!(contact_id = %saved.id, created, "✅ contato salvo");
                Ok(SaveOutcome::Saved { redirect: format!("/contacts/{}", saved.id), id: saved.id })
            }
            Err(e) => {
                // O rascunho fica intacto para o usuário tentar de novo.
                reporter.capture(&e, "save_contact");
                notifier.notify(Toast::error(
                    "Save failed",
                    "Could not save the contact. Your changes are kept, please try again.",
                ));
                Err(e)
            }
        }
    }

    fn mark_saved(&mut self, id: String) {
        self.mode = EditorMode::Edit;
        self.contact_id = Some(id);
        self.initial = self.draft.clone();
        self.errors.clear();
    }

    pub fn handle_cancel(&self, confirmed: bool) -> CancelOutcome {
        if self.has_unsaved_changes() && !confirmed {
            return CancelOutcome::ConfirmationRequired;
        }
        let redirect = match &self.contact_id {
            Some(id) => format!("/contacts/{id}"),
            None => "/contacts".to_string(),
        };
        CancelOutcome::Discarded { redirect }
    }
}
