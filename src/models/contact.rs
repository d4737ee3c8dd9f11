// src/models/contact.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::ids::EntityId;
use crate::constants::{
    COMPLIANCE_EXPIRY_WARNING_DAYS, COUNTRY_CODE, HEX_COLOR, MAX_ADDRESS_LINE_LENGTH, MAX_CITY_LENGTH,
    MAX_DESIGNATION_LENGTH, MAX_NOTES_LENGTH, MAX_PERSON_NAME_LENGTH, MAX_STATE_LENGTH, MAX_TAG_LABEL_LENGTH,
    MIN_PERSON_NAME_LENGTH, POSTAL_CODE,
};
use crate::validation;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    #[default]
    Individual,
    Corporate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    NoExpiry,
    Expired,
    Expiring,
    Valid,
}

// --- SUB-REGISTROS ---
// Regras de formato fixas ficam nos atributos `validate`; o que depende
// do tipo do canal ou dos dados mestres fica em `crate::validation`.

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validation::channel::validate_channel_value", skip_on_field_errors = false))]
pub struct ContactChannel {
    #[serde(default)]
    pub id: EntityId,
    #[validate(custom(function = "validation::channel::known_channel_type"))]
    pub channel_type: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub value: String,
    #[validate(regex(path = *COUNTRY_CODE, code = "invalid_country_code", message = "Country code must look like +91"))]
    pub country_code: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[validate(length(max = MAX_NOTES_LENGTH, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Address {
    #[serde(default)]
    pub id: EntityId,
    #[validate(custom(function = "validation::address::known_address_type"))]
    pub address_type: String,
    #[validate(
        custom(function = "validation::not_blank"),
        length(max = MAX_ADDRESS_LINE_LENGTH, message = "Address line 1 must be at most 255 characters")
    )]
    pub line1: String,
    #[validate(length(max = MAX_ADDRESS_LINE_LENGTH, message = "Address line 2 must be at most 255 characters"))]
    pub line2: Option<String>,
    #[validate(length(max = MAX_ADDRESS_LINE_LENGTH, message = "Address line 3 must be at most 255 characters"))]
    pub line3: Option<String>,
    #[validate(
        custom(function = "validation::not_blank"),
        length(max = MAX_CITY_LENGTH, message = "City must be at most 100 characters")
    )]
    pub city: String,
    #[validate(length(max = MAX_STATE_LENGTH, message = "State must be at most 100 characters"))]
    pub state: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub country: String,
    #[validate(
        custom(function = "validation::not_blank"),
        regex(path = *POSTAL_CODE, code = "invalid_postal_code", message = "Please enter a valid postal code")
    )]
    pub postal_code: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[validate(length(max = MAX_NOTES_LENGTH, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ComplianceNumber {
    #[serde(default)]
    pub id: EntityId,
    #[validate(custom(function = "validation::not_blank"))]
    pub type_value: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub number: String,
    pub issuing_authority: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub is_verified: bool,
}

impl ComplianceNumber {
    /// Situação de validade do documento em relação a `today`.
    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        let Some(valid_to) = self.valid_to else {
            return ExpiryStatus::NoExpiry;
        };
        let days_left = (valid_to - today).num_days();
        if days_left < 0 {
            ExpiryStatus::Expired
        } else if days_left <= COMPLIANCE_EXPIRY_WARNING_DAYS {
            ExpiryStatus::Expiring
        } else {
            ExpiryStatus::Valid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ContactPerson {
    #[serde(default)]
    pub id: EntityId,
    #[validate(custom(function = "validation::person::known_salutation"))]
    pub salutation: Option<String>,
    #[validate(
        custom(function = "validation::not_blank"),
        length(min = MIN_PERSON_NAME_LENGTH, max = MAX_PERSON_NAME_LENGTH, message = "Name must have 2 to 100 characters")
    )]
    pub name: String,
    #[validate(length(max = MAX_DESIGNATION_LENGTH, message = "Designation must be at most 100 characters"))]
    pub designation: Option<String>,
    #[validate(length(max = MAX_DESIGNATION_LENGTH, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    #[validate(nested)]
    pub contact_channels: Vec<ContactChannel>,
    #[validate(length(max = MAX_NOTES_LENGTH, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ContactTag {
    #[serde(default)]
    pub id: EntityId,
    #[validate(custom(function = "validation::not_blank"))]
    pub tag_value: String,
    #[serde(default)]
    #[validate(length(max = MAX_TAG_LABEL_LENGTH, message = "Tag label must be at most 50 characters"))]
    pub tag_label: String,
    #[validate(regex(path = *HEX_COLOR, code = "invalid_color", message = "Tag color must be a hex value like #1A2B3C"))]
    pub tag_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Classification {
    #[validate(custom(function = "validation::classification::known_classification"))]
    pub value: String,
    pub label: Option<String>,
}

// --- PATCHES (update(index, patch)) ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelPatch {
    pub channel_type: Option<String>,
    pub value: Option<String>,
    pub country_code: Option<String>,
    pub is_primary: Option<bool>,
    pub is_verified: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPatch {
    pub address_type: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub is_primary: Option<bool>,
    pub is_verified: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompliancePatch {
    pub type_value: Option<String>,
    pub number: Option<String>,
    pub issuing_authority: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
    pub salutation: Option<String>,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub is_primary: Option<bool>,
    pub contact_channels: Option<Vec<ContactChannel>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPatch {
    pub tag_value: Option<String>,
    pub tag_label: Option<String>,
    pub tag_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationPatch {
    pub value: Option<String>,
    pub label: Option<String>,
}

// --- O RASCUNHO ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub classifications: Vec<Classification>,
    pub status: ContactStatus,
    pub salutation: Option<String>,
    pub name: String,
    pub company_name: String,
    pub contact_channels: Vec<ContactChannel>,
    pub addresses: Vec<Address>,
    pub compliance_numbers: Vec<ComplianceNumber>,
    pub contact_persons: Vec<ContactPerson>,
    pub tags: Vec<ContactTag>,
    pub notes: String,
}

impl ContactDraft {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Atualização parcial dos campos simples (updateFormData).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    #[serde(rename = "type")]
    pub contact_type: Option<ContactType>,
    pub status: Option<ContactStatus>,
    pub salutation: Option<String>,
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub notes: Option<String>,
}

/// Contato como devolvido pelo backend (getContact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    #[serde(flatten)]
    pub draft: ContactDraft,
}

// --- PAYLOAD DE SUBMISSÃO ---
// Ids pendentes viram `None`; classificações viram strings.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub channel_type: String,
    pub value: String,
    pub country_code: Option<String>,
    pub is_primary: bool,
    pub is_verified: bool,
    pub notes: Option<String>,
}

impl From<&ContactChannel> for ChannelPayload {
    fn from(c: &ContactChannel) -> Self {
        Self {
            id: c.id.persisted().map(str::to_owned),
            channel_type: c.channel_type.clone(),
            value: c.value.trim().to_string(),
            country_code: c.country_code.clone(),
            is_primary: c.is_primary,
            is_verified: c.is_verified,
            notes: c.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub address_type: String,
    pub line1: String,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: String,
    pub is_primary: bool,
    pub is_verified: bool,
    pub notes: Option<String>,
}

impl From<&Address> for AddressPayload {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.persisted().map(str::to_owned),
            address_type: a.address_type.clone(),
            line1: a.line1.clone(),
            line2: a.line2.clone(),
            line3: a.line3.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            country: a.country.clone(),
            postal_code: a.postal_code.clone(),
            is_primary: a.is_primary,
            is_verified: a.is_verified,
            notes: a.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompliancePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub type_value: String,
    pub number: String,
    pub issuing_authority: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub is_verified: bool,
}

impl From<&ComplianceNumber> for CompliancePayload {
    fn from(c: &ComplianceNumber) -> Self {
        Self {
            id: c.id.persisted().map(str::to_owned),
            type_value: c.type_value.clone(),
            number: c.number.trim().to_uppercase(),
            issuing_authority: c.issuing_authority.clone(),
            valid_from: c.valid_from,
            valid_to: c.valid_to,
            is_verified: c.is_verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub salutation: Option<String>,
    pub name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub is_primary: bool,
    pub contact_channels: Vec<ChannelPayload>,
    pub notes: Option<String>,
}

impl From<&ContactPerson> for PersonPayload {
    fn from(p: &ContactPerson) -> Self {
        Self {
            id: p.id.persisted().map(str::to_owned),
            salutation: p.salutation.clone(),
            name: p.name.trim().to_string(),
            designation: p.designation.clone(),
            department: p.department.clone(),
            is_primary: p.is_primary,
            contact_channels: p.contact_channels.iter().map(ChannelPayload::from).collect(),
            notes: p.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag_value: String,
    pub tag_label: String,
    pub tag_color: Option<String>,
}

impl From<&ContactTag> for TagPayload {
    fn from(t: &ContactTag) -> Self {
        Self {
            id: t.id.persisted().map(str::to_owned),
            tag_value: t.tag_value.clone(),
            tag_label: t.tag_label.clone(),
            tag_color: t.tag_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPayload {
    pub tenant_id: Uuid,
    pub is_live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,

    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub status: ContactStatus,
    pub classifications: Vec<String>,
    pub salutation: Option<String>,
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub contact_channels: Vec<ChannelPayload>,
    pub addresses: Vec<AddressPayload>,
    pub compliance_numbers: Vec<CompliancePayload>,
    pub contact_persons: Vec<PersonPayload>,
    pub tags: Vec<TagPayload>,
    pub notes: Option<String>,
}

// --- DUPLICIDADE / STATUS / CONVITE ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateCriteria {
    pub tenant_id: Uuid,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub match_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DuplicateCheck {
    pub has_duplicates: bool,
    #[serde(default)]
    pub duplicates: Vec<DuplicateMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedContact {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub channel_type: String,
    pub recipient: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationReceipt {
    pub invitation_id: String,
    #[serde(default)]
    pub status: Option<String>,
}
