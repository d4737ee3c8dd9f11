// src/sections/persons.rs

use validator::ValidationErrors;

use super::{keep_first_primary, SectionContext, SectionItem, SectionLimits};
use crate::common::ids::EntityId;
use crate::models::contact::{ContactDraft, ContactPerson, PersonPatch};
use crate::validation::validate_person;

impl SectionItem for ContactPerson {
    type Patch = PersonPatch;

    const SECTION: &'static str = "contact_persons";
    const PRIMARY_CAPABLE: bool = true;
    const CORPORATE_ONLY: bool = true;

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.contact_persons
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.contact_persons
    }

    fn apply_patch(&mut self, patch: PersonPatch) {
        if let Some(v) = patch.salutation {
            self.salutation = Some(v);
        }
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.designation {
            self.designation = Some(v);
        }
        if let Some(v) = patch.department {
            self.department = Some(v);
        }
        if let Some(v) = patch.is_primary {
            self.is_primary = v;
        }
        if let Some(v) = patch.contact_channels {
            self.contact_channels = v;
        }
        if let Some(v) = patch.notes {
            self.notes = Some(v);
        }
    }

    fn validate(&self, _ctx: &SectionContext<'_>) -> Result<(), ValidationErrors> {
        validate_person(self)
    }

    fn max_items(limits: &SectionLimits) -> Option<usize> {
        Some(limits.max_persons)
    }

    fn assign_pending_id(&mut self) {
        self.id = EntityId::pending();
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn set_primary(&mut self, primary: bool) {
        self.is_primary = primary;
    }

    fn patch_sets_primary(patch: &PersonPatch) -> bool {
        patch.is_primary == Some(true)
    }

    // Os canais aninhados seguem a mesma regra de primário único.
    fn prepare(&mut self, ctx: &SectionContext<'_>) {
        for channel in self.contact_channels.iter_mut() {
            channel.prepare(ctx);
        }
        keep_first_primary(&mut self.contact_channels);
    }
}
