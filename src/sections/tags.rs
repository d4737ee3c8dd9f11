// src/sections/tags.rs

use validator::ValidationErrors;

use super::{SectionContext, SectionItem, SectionLimits};
use crate::common::ids::EntityId;
use crate::constants::TAGS_CATEGORY;
use crate::models::contact::{ContactDraft, ContactTag, TagPatch};
use crate::validation::validate_tag;

impl SectionItem for ContactTag {
    type Patch = TagPatch;

    const SECTION: &'static str = "tags";

    const OPTIONS_CATEGORY: Option<&'static str> = Some(TAGS_CATEGORY);

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.tags
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.tags
    }

    fn apply_patch(&mut self, patch: TagPatch) {
        if let Some(v) = patch.tag_value {
            self.tag_value = v;
        }
        if let Some(v) = patch.tag_label {
            self.tag_label = v;
        }
        if let Some(v) = patch.tag_color {
            self.tag_color = Some(v);
        }
    }

    fn validate(&self, ctx: &SectionContext<'_>) -> Result<(), ValidationErrors> {
        validate_tag(self, ctx.options)
    }

    fn max_items(limits: &SectionLimits) -> Option<usize> {
        Some(limits.max_tags)
    }

    fn assign_pending_id(&mut self) {
        self.id = EntityId::pending();
    }

    fn dedup_key(&self) -> Option<String> {
        Some(self.tag_value.trim().to_lowercase())
    }

    // Completa rótulo e cor a partir dos dados mestres.
    fn prepare(&mut self, ctx: &SectionContext<'_>) {
        self.tag_value = self.tag_value.trim().to_string();
        if let Some(option) = ctx.options.find(&self.tag_value) {
            self.tag_value = option.value.clone();
            if self.tag_label.trim().is_empty() {
                self.tag_label = option.label.clone();
            }
            if self.tag_color.is_none() {
                self.tag_color = option.color.clone();
            }
        }
        if self.tag_label.trim().is_empty() {
            self.tag_label = self.tag_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::models::master_data::{MasterDataOption, OptionsState};
    use crate::sections::add;

    fn tag(value: &str) -> ContactTag {
        ContactTag { tag_value: value.into(), ..Default::default() }
    }

    fn catalog() -> OptionsState {
        OptionsState::ready(vec![
            MasterDataOption {
                value: "vip".into(),
                label: "VIP".into(),
                color: Some("#D4AF37".into()),
                tooltip: Some("High value".into()),
                sequence_no: Some(1),
            },
            MasterDataOption {
                value: "wholesale".into(),
                label: "Wholesale".into(),
                color: None,
                tooltip: None,
                sequence_no: Some(2),
            },
        ])
    }

    #[test]
    fn duplicate_tag_value_is_rejected() {
        let options = catalog();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let list = add(&[], tag("vip"), &ctx).unwrap();
        let err = add(&list, tag("vip"), &ctx).unwrap_err();
        assert!(matches!(err, AppError::DuplicateItem(_)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn label_and_color_come_from_master_data() {
        let options = catalog();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let list = add(&[], tag("vip"), &ctx).unwrap();
        assert_eq!(list[0].tag_label, "VIP");
        assert_eq!(list[0].tag_color.as_deref(), Some("#D4AF37"));
    }

    #[test]
    fn unknown_tag_rejected_only_when_catalog_loaded() {
        let options = catalog();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        assert!(matches!(add(&[], tag("retail"), &ctx), Err(AppError::Validation(_))));

        let loading = OptionsState { loading: true, ..Default::default() };
        let ctx = SectionContext::new(&loading, SectionLimits::default());
        assert!(add(&[], tag("retail"), &ctx).is_ok());
    }

    #[test]
    fn respects_configured_max() {
        let options = OptionsState::default();
        let limits = SectionLimits { max_tags: 2, ..Default::default() };
        let ctx = SectionContext::new(&options, limits);
        let list = add(&[], tag("a"), &ctx).unwrap();
        let list = add(&list, tag("b"), &ctx).unwrap();
        assert!(matches!(add(&list, tag("c"), &ctx), Err(AppError::LimitReached { max: 2, .. })));
    }

    #[test]
    fn duplicate_check_ignores_case() {
        let options = OptionsState::default();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let list = add(&[], tag("VIP"), &ctx).unwrap();
        let err = add(&list, tag(" vip "), &ctx).unwrap_err();
        assert!(matches!(err, AppError::DuplicateItem(_)));

        let options = catalog();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let list = add(&[], tag("Wholesale"), &ctx).unwrap();
        assert_eq!(list[0].tag_value, "wholesale");
        assert!(matches!(add(&list, tag("WHOLESALE"), &ctx), Err(AppError::DuplicateItem(_))));
    }
}
