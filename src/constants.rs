// src/constants.rs

use std::sync::LazyLock;

use regex::Regex;

// --- Limites ---

pub const MAX_CONTACT_PERSONS: usize = 10;
pub const DEFAULT_MAX_TAGS: usize = 10;
pub const COMPLIANCE_EXPIRY_WARNING_DAYS: i64 = 30;
// Sessões de edição paradas por mais tempo que isso são descartadas.
pub const DEFAULT_SESSION_IDLE_TTL_MINUTES: u64 = 60;

pub const MAX_NOTES_LENGTH: u64 = 500;
pub const MAX_ADDRESS_LINE_LENGTH: u64 = 255;
pub const MAX_CITY_LENGTH: u64 = 100;
pub const MAX_STATE_LENGTH: u64 = 100;
pub const MIN_PERSON_NAME_LENGTH: u64 = 2;
pub const MAX_PERSON_NAME_LENGTH: u64 = 100;
pub const MAX_DESIGNATION_LENGTH: u64 = 100;
pub const MAX_TAG_LABEL_LENGTH: u64 = 50;

// --- Valores permitidos ---

pub const CHANNEL_TYPES: &[&str] = &[
    "email", "mobile", "phone", "whatsapp", "website", "linkedin", "telegram",
];

/// Canais cujo valor é um número de telefone.
pub const PHONE_CHANNEL_TYPES: &[&str] = &["mobile", "phone", "whatsapp", "telegram"];

pub const ADDRESS_TYPES: &[&str] = &["billing", "shipping", "office", "home", "factory", "warehouse", "other"];

pub const SALUTATIONS: &[&str] = &["mr", "ms", "mrs", "dr", "prof"];

pub const CLASSIFICATIONS: &[&str] = &[
    "buyer", "seller", "vendor", "partner", "customer", "lead", "team_member",
];

// Categorias de dados mestres
pub const TAGS_CATEGORY: &str = "contact_tags";
pub const COMPLIANCE_CATEGORY: &str = "compliance_types";

// --- Portão da comunidade ---

pub const COMMUNITY_GATE_PASSWORD: &str = "bagyanagar";
pub const COMMUNITY_GATE_BRANCH: &str = "bagyanagar";
pub const DEFAULT_GATE_DELAY_MS: u64 = 1000;

// --- Padrões ---

pub static PHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{7,15}$").expect("regex de telefone"));

pub static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{1,4}$").expect("regex de DDI"));

pub static WEBSITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+(:\d+)?(/\S*)?$").expect("regex de URL")
});

pub static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,9}$").expect("regex de CEP"));

pub static PAN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("regex de PAN"));

pub static GSTIN_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("regex de GSTIN")
});

pub static GENERIC_COMPLIANCE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-/]{2,50}$").expect("regex de documento"));

pub static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("regex de cor"));
