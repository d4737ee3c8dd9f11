// src/sections/compliance.rs

use validator::ValidationErrors;

use super::{SectionContext, SectionItem};
use crate::common::ids::EntityId;
use crate::constants::COMPLIANCE_CATEGORY;
use crate::models::contact::{ComplianceNumber, CompliancePatch, ContactDraft};
use crate::validation::validate_compliance;

impl SectionItem for ComplianceNumber {
    type Patch = CompliancePatch;

    const SECTION: &'static str = "compliance_numbers";

    const OPTIONS_CATEGORY: Option<&'static str> = Some(COMPLIANCE_CATEGORY);

    fn list(draft: &ContactDraft) -> &Vec<Self> {
        &draft.compliance_numbers
    }

    fn list_mut(draft: &mut ContactDraft) -> &mut Vec<Self> {
        &mut draft.compliance_numbers
    }

    fn apply_patch(&mut self, patch: CompliancePatch) {
        if let Some(v) = patch.type_value {
            self.type_value = v;
        }
        if let Some(v) = patch.number {
            self.number = v;
        }
        if let Some(v) = patch.issuing_authority {
            self.issuing_authority = Some(v);
        }
        if let Some(v) = patch.valid_from {
            self.valid_from = Some(v);
        }
        if let Some(v) = patch.valid_to {
            self.valid_to = Some(v);
        }
        if let Some(v) = patch.is_verified {
            self.is_verified = v;
        }
    }

    fn validate(&self, ctx: &SectionContext<'_>) -> Result<(), ValidationErrors> {
        validate_compliance(self, ctx.options)
    }

    fn assign_pending_id(&mut self) {
        self.id = EntityId::pending();
    }

    fn dedup_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.type_value.to_lowercase(), self.number))
    }

    // O tipo assume a grafia do catálogo ("PAN" continua "PAN").
    fn prepare(&mut self, ctx: &SectionContext<'_>) {
        let type_value = self.type_value.trim();
        self.type_value = match ctx.options.find(type_value) {
            Some(option) => option.value.clone(),
            None => type_value.to_lowercase(),
        };
        self.number = self.number.trim().to_uppercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::models::master_data::{MasterDataOption, OptionsState};
    use crate::sections::{add, SectionLimits};

    fn upper_case_catalog() -> OptionsState {
        OptionsState::ready(
            ["PAN", "GSTIN"]
                .into_iter()
                .map(|v| MasterDataOption {
                    value: v.into(),
                    label: v.into(),
                    color: None,
                    tooltip: None,
                    sequence_no: None,
                })
                .collect(),
        )
    }

    #[test]
    fn same_number_twice_is_rejected() {
        let options = OptionsState::default();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let pan = ComplianceNumber {
            type_value: "PAN".into(),
            number: "abcde1234f".into(),
            ..Default::default()
        };

        let list = add(&[], pan.clone(), &ctx).unwrap();
        assert_eq!(list[0].number, "ABCDE1234F");

        let err = add(&list, pan, &ctx).unwrap_err();
        assert!(matches!(err, AppError::DuplicateItem(_)));
    }

    #[test]
    fn upper_case_catalog_type_is_accepted() {
        let options = upper_case_catalog();
        let ctx = SectionContext::new(&options, SectionLimits::default());
        let pan = ComplianceNumber {
            type_value: "PAN".into(),
            number: "ABCDE1234F".into(),
            ..Default::default()
        };

        let list = add(&[], pan, &ctx).unwrap();
        assert_eq!(list[0].type_value, "PAN");

        let lower = ComplianceNumber {
            type_value: "gstin".into(),
            number: "27AAPFU0939F1ZV".into(),
            ..Default::default()
        };
        let list = add(&list, lower, &ctx).unwrap();
        assert_eq!(list[1].type_value, "GSTIN");
    }
}
