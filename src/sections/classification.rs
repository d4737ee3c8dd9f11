// src/sections/classification.rs

use validator::ValidationErrors;

use super::{SectionContext, SectionItem};
use crate::models::contact::{Classification, ClassificationPatch, ContactDraft};
use crate::validation::validate_classification;

impl SectionItem for Classification {
    type Patch = ClassificationPatch;

    const SECTION: &'static str = "classifications";

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.classifications
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.classifications
    }

    fn apply_patch(&mut self, patch: ClassificationPatch) {
        if let Some(v) = patch.value {
            self.value = v;
        }
        if let Some(v) = patch.label {
            self.label = Some(v);
        }
    }

    fn validate(&self, _ctx: &SectionContext<'_>) -> Result<(), ValidationErrors> {
        validate_classification(self)
    }

    fn dedup_key(&self) -> Option<String> {
        Some(self.value.clone())
    }

    fn prepare(&mut self, _ctx: &SectionContext<'_>) {
        self.value = self.value.trim().to_lowercase();
    }
}
