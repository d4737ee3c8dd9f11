// src/sections/addresses.rs

use validator::ValidationErrors;

use super::{SectionContext, SectionItem};
use crate::common::ids::EntityId;
use crate::models::contact::{Address, AddressPatch, ContactDraft};
use crate::validation::validate_address;

impl SectionItem for Address {
    type Patch = AddressPatch;

    const SECTION: &'static str = "addresses";
    const PRIMARY_CAPABLE: bool = true;

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.addresses
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.addresses
    }

    fn apply_patch(&mut self, patch: AddressPatch) {
        if let Some(v) = patch.address_type {
            self.address_type = v;
        }
        if let Some(v) = patch.line1 {
            self.line1 = v;
        }
        if let Some(v) = patch.line2 {
            self.line2 = Some(v);
        }
        if let Some(v) = patch.line3 {
            self.line3 = Some(v);
        }
        if let Some(v) = patch.city {
            self.city = v;
        }
        if let Some(v) = patch.state {
            self.state = Some(v);
        }
        if let Some(v) = patch.country {
            self.country = v;
        }
        if let Some(v) = patch.postal_code {
            self.postal_code = v;
        }
        if let Some(v) = patch.is_primary {
            self.is_primary = v;
        }
        if let Some(v) = patch.is_verified {
            self.is_verified = v;
        }
        if let Some(v) = patch.notes {
            self.notes = Some(v);
        }
    }

    fn validate(&self, _ctx: &SectionContext<'_>) -> Result<(), ValidationErrors> {
        validate_address(self)
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

    fn patch_sets_primary(patch: &AddressPatch) -> bool {
        patch.is_primary == Some(true)
    }

    fn prepare(&mut self, _ctx: &SectionContext<'_>) {
        self.address_type = self.address_type.trim().to_lowercase();
        self.postal_code = self.postal_code.trim().to_string();
    }
}
