// src/sections/channels.rs

use validator::ValidationErrors;

use super::{SectionContext, SectionItem};
use crate::common::ids::EntityId;
use crate::models::contact::{ChannelPatch, ContactChannel, ContactDraft};
use crate::validation::validate_channel;

impl SectionItem for ContactChannel {
    type Patch = ChannelPatch;

    const SECTION: &'static str = "contact_channels";
    const PRIMARY_CAPABLE: bool = true;

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.contact_channels
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.contact_channels
    }

    fn apply_patch(&mut self, patch: ChannelPatch) {
        if let Some(v) = patch.channel_type {
            self.channel_type = v;
        }
        if let Some(v) = patch.value {
            self.value = v;
        }
        if let Some(v) = patch.country_code {
            self.country_code = Some(v);
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
        validate_channel(self)
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

    fn patch_sets_primary(patch: &ChannelPatch) -> bool {
        patch.is_primary == Some(true)
    }

    fn prepare(&mut self, _ctx: &SectionContext<'_>) {
        self.channel_type = self.channel_type.trim().to_lowercase();
        if self.channel_type == "email" {
            self.value = self.value.trim().to_lowercase();
        }
    }
}
