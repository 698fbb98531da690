//! Request and response bodies for the document services (validation,
//! format conversion, profile resolution)
//!
//! OSCAL document bodies themselves travel as opaque strings.

use serde::{Deserialize, Serialize};

/// Serialization format of an OSCAL document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Xml,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Parse a format name or file extension ("json", "yml", ".xml")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "xml" => Some(DocumentFormat::Xml),
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Guess the format from the first meaningful character of the content
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('<') => DocumentFormat::Xml,
            Some('{') | Some('[') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Xml => "xml",
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// OSCAL model carried by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Catalog,
    Profile,
    ComponentDefinition,
    SystemSecurityPlan,
    AssessmentPlan,
    AssessmentResults,
    PlanOfActionAndMilestones,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 7] = [
        DocumentKind::Catalog,
        DocumentKind::Profile,
        DocumentKind::ComponentDefinition,
        DocumentKind::SystemSecurityPlan,
        DocumentKind::AssessmentPlan,
        DocumentKind::AssessmentResults,
        DocumentKind::PlanOfActionAndMilestones,
    ];

    /// Root element / root key name used by the OSCAL schemas
    pub fn root_name(&self) -> &'static str {
        match self {
            DocumentKind::Catalog => "catalog",
            DocumentKind::Profile => "profile",
            DocumentKind::ComponentDefinition => "component-definition",
            DocumentKind::SystemSecurityPlan => "system-security-plan",
            DocumentKind::AssessmentPlan => "assessment-plan",
            DocumentKind::AssessmentResults => "assessment-results",
            DocumentKind::PlanOfActionAndMilestones => "plan-of-action-and-milestones",
        }
    }

    /// Parse a root name such as `system-security-plan` (also accepts `ssp`,
    /// `sap`, `sar` and `poam`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ssp" => Some(DocumentKind::SystemSecurityPlan),
            "sap" => Some(DocumentKind::AssessmentPlan),
            "sar" => Some(DocumentKind::AssessmentResults),
            "poam" => Some(DocumentKind::PlanOfActionAndMilestones),
            name => Self::ALL.iter().copied().find(|k| k.root_name() == name),
        }
    }

    /// Detect the model from a document body in any of the three formats.
    ///
    /// Looks for the root name as a JSON key (`"catalog":`), an XML root
    /// element (`<catalog`) or a YAML top-level key (`catalog:`), and picks
    /// the one appearing earliest in the text.
    pub fn detect(content: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .filter_map(|kind| {
                let name = kind.root_name();
                [
                    format!("\"{}\"", name),
                    format!("<{}", name),
                    format!("{}:", name),
                ]
                .iter()
                .filter_map(|needle| {
                    content.match_indices(needle.as_str()).find_map(|(pos, _)| {
                        // Reject prefixes of longer names, e.g. `<profile-x`
                        let rest = &content[pos + needle.len()..];
                        let boundary = !needle.starts_with('<')
                            || rest
                                .chars()
                                .next()
                                .map_or(true, |c| c.is_whitespace() || c == '>' || c == '/');
                        boundary.then_some(pos)
                    })
                })
                .min()
                .map(|pos| (pos, *kind))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, kind)| kind)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.root_name())
    }
}

/// Body for `POST /api/validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub content: String,
    pub format: DocumentFormat,
    #[serde(rename = "documentType", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentKind>,
}

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// One schema or constraint finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default = "default_issue_severity")]
    pub severity: IssueSeverity,
}

fn default_issue_severity() -> IssueSeverity {
    IssueSeverity::Error
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(rename = "documentType", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentKind>,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Body for `POST /api/convert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub content: String,
    #[serde(rename = "fromFormat")]
    pub from_format: DocumentFormat,
    #[serde(rename = "toFormat")]
    pub to_format: DocumentFormat,
}

/// Converted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub content: String,
    pub format: DocumentFormat,
}

/// Body for `POST /api/profile/resolve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResolveRequest {
    pub content: String,
    pub format: DocumentFormat,
}

/// Catalog produced by resolving a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    pub content: String,
    pub format: DocumentFormat,
    #[serde(rename = "controlCount", default, skip_serializing_if = "Option::is_none")]
    pub control_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_accepts_extensions() {
        assert_eq!(DocumentFormat::parse(".yml"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::parse("JSON"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::parse("xml"), Some(DocumentFormat::Xml));
        assert_eq!(DocumentFormat::parse("docx"), None);
    }

    #[test]
    fn test_format_sniff() {
        assert_eq!(DocumentFormat::sniff("  <?xml version=\"1.0\"?>"), DocumentFormat::Xml);
        assert_eq!(DocumentFormat::sniff("\n{\"catalog\": {}}"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::sniff("catalog:\n  uuid: x"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_detect_kind_in_each_format() {
        assert_eq!(
            DocumentKind::detect(r#"{"system-security-plan": {"uuid": "x"}}"#),
            Some(DocumentKind::SystemSecurityPlan)
        );
        assert_eq!(
            DocumentKind::detect("<?xml version=\"1.0\"?>\n<profile xmlns=\"http://csrc.nist.gov/ns/oscal/1.0\">"),
            Some(DocumentKind::Profile)
        );
        assert_eq!(
            DocumentKind::detect("---\ncomponent-definition:\n  uuid: x\n"),
            Some(DocumentKind::ComponentDefinition)
        );
        assert_eq!(DocumentKind::detect("hello"), None);
    }

    #[test]
    fn test_detect_prefers_root_over_nested_mentions() {
        // A catalog that mentions a profile later on
        let json = r#"{"catalog": {"metadata": {"props": [{"name": "profile", "value": "x"}]}}}"#;
        assert_eq!(DocumentKind::detect(json), Some(DocumentKind::Catalog));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(DocumentKind::parse("ssp"), Some(DocumentKind::SystemSecurityPlan));
        assert_eq!(
            DocumentKind::parse("Component_Definition"),
            Some(DocumentKind::ComponentDefinition)
        );
        assert_eq!(DocumentKind::parse("letter"), None);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&DocumentKind::PlanOfActionAndMilestones).unwrap();
        assert_eq!(json, r#""plan-of-action-and-milestones""#);
    }

    #[test]
    fn test_report_defaults() {
        let report: ValidationReport =
            serde_json::from_str(r#"{"valid": false, "errors": [{"message": "bad uuid"}]}"#)
                .unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors[0].severity, IssueSeverity::Error);
        assert_eq!(report.issue_count(), 1);
    }
}
