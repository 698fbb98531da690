//! Embedded template loader
//!
//! Markdown templates are loaded from `templates/` at compile time.

/// Authorization to Operate letter - templates/ato_letter.md
const ATO_LETTER_TEMPLATE: &str = include_str!("../../templates/ato_letter.md");

/// Interim ATO letter - templates/interim_ato.md
const INTERIM_ATO_TEMPLATE: &str = include_str!("../../templates/interim_ato.md");

/// Risk acceptance memo - templates/risk_acceptance.md
const RISK_ACCEPTANCE_TEMPLATE: &str = include_str!("../../templates/risk_acceptance.md");

/// Get an embedded template by name
pub fn get_embedded_template(name: &str) -> Option<&'static str> {
    match name {
        "ato_letter" => Some(ATO_LETTER_TEMPLATE),
        "interim_ato" => Some(INTERIM_ATO_TEMPLATE),
        "risk_acceptance" => Some(RISK_ACCEPTANCE_TEMPLATE),
        _ => None,
    }
}

/// Names of all embedded templates
pub fn list_embedded_templates() -> Vec<&'static str> {
    vec!["ato_letter", "interim_ato", "risk_acceptance"]
}
