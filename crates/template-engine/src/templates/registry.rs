//! Template registry and metadata

use super::embedded;
use crate::errors::{Result, TemplateError};
use crate::template::Template;
use crate::variables::extract_variables;
use serde::{Deserialize, Serialize};

const BUILTIN_URI_PREFIX: &str = "template://builtin/";

/// Information about a built-in template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template name (used in URIs and as the template id)
    pub name: String,
    /// Human-readable title
    pub title: String,
    /// Short description
    pub description: String,
    /// Full URI for this template
    pub uri: String,
    /// Variables in first-appearance order
    pub variables: Vec<String>,
}

fn describe(name: &str) -> (&'static str, &'static str) {
    match name {
        "ato_letter" => (
            "Authorization to Operate",
            "Full ATO decision letter with terms and conditions",
        ),
        "interim_ato" => (
            "Interim Authorization to Operate",
            "Time-limited authorization while open findings are remediated",
        ),
        "risk_acceptance" => (
            "Risk Acceptance Memorandum",
            "Acceptance of residual risk for a single control",
        ),
        _ => ("Untitled", ""),
    }
}

/// List all built-in templates
pub fn list_templates() -> Vec<TemplateInfo> {
    embedded::list_embedded_templates()
        .into_iter()
        .filter_map(|name| {
            let source = embedded::get_embedded_template(name)?;
            let (title, description) = describe(name);
            Some(TemplateInfo {
                name: name.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                uri: format!("{}{}", BUILTIN_URI_PREFIX, name),
                variables: extract_variables(source),
            })
        })
        .collect()
}

/// Raw markdown of a built-in template
pub fn get_template_source(name: &str) -> Result<&'static str> {
    embedded::get_embedded_template(name)
        .ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))
}

/// Built-in template as a `Template`, id = name
pub fn builtin_template(name: &str) -> Result<Template> {
    let source = get_template_source(name)?;
    let (title, description) = describe(name);
    Ok(Template::new(name, title, source)?.with_description(description))
}

/// Parse a built-in template URI and return the template name
pub fn parse_builtin_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(BUILTIN_URI_PREFIX)
}

/// Check if a URI refers to a built-in template
pub fn is_builtin_uri(uri: &str) -> bool {
    uri.starts_with(BUILTIN_URI_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_templates() {
        let templates = list_templates();
        assert_eq!(templates.len(), 3);
        assert!(templates.iter().any(|t| t.name == "ato_letter"));
    }

    #[test]
    fn test_get_template_source() {
        let source = get_template_source("ato_letter").unwrap();
        assert!(source.contains("Authorization to Operate"));

        assert!(matches!(
            get_template_source("nope"),
            Err(TemplateError::TemplateNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_ato_letter_variables_in_order() {
        let info = list_templates()
            .into_iter()
            .find(|t| t.name == "ato_letter")
            .unwrap();
        assert_eq!(
            info.variables,
            vec![
                "date",
                "system owner",
                "authorizing official",
                "system name",
                "Low, Moderate, or High",
                "expiration date",
                "additional conditions",
            ]
        );
    }

    #[test]
    fn test_builtin_template_matches_registry() {
        for info in list_templates() {
            let template = builtin_template(&info.name).unwrap();
            assert_eq!(template.id(), info.name);
            assert_eq!(template.name(), info.title);
            assert_eq!(template.variables(), info.variables.as_slice());
        }
    }

    #[test]
    fn test_parse_builtin_uri() {
        assert_eq!(
            parse_builtin_uri("template://builtin/risk_acceptance"),
            Some("risk_acceptance")
        );
        assert_eq!(parse_builtin_uri("https://example.com"), None);
        assert!(is_builtin_uri("template://builtin/ato_letter"));
    }
}
