//! Authorization template with derived variable list

use crate::errors::{Result, TemplateError};
use crate::substitute::{completion, substitute, Completion};
use crate::variables::extract_variables;
use oscal_types::{TemplateRecord, TemplateUpsert, VariableValues};
use serde::Serialize;

/// A template whose `variables` always match its `content`.
///
/// The list is recomputed on construction and on every content change, so
/// a stale list from storage can never leak into the authoring flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    id: String,
    name: String,
    content: String,
    variables: Vec<String>,
    description: Option<String>,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        let content = content.into();
        let variables = extract_variables(&content);
        Ok(Self {
            id: id.into(),
            name,
            content,
            variables,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    /// Replace the content and recompute the variable list
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.variables = extract_variables(&self.content);
        tracing::debug!(
            template = %self.id,
            variables = self.variables.len(),
            "recomputed template variables"
        );
    }

    /// Content with `values` substituted
    pub fn complete(&self, values: &VariableValues) -> String {
        substitute(&self.content, values)
    }

    pub fn completion(&self, values: &VariableValues) -> Completion {
        completion(&self.content, values)
    }

    /// Body for saving this template to the backend
    pub fn to_upsert(&self) -> TemplateUpsert {
        TemplateUpsert {
            name: self.name.clone(),
            content: self.content.clone(),
            variables: self.variables.clone(),
            description: self.description.clone(),
        }
    }
}

impl TryFrom<TemplateRecord> for Template {
    type Error = TemplateError;

    fn try_from(record: TemplateRecord) -> Result<Self> {
        let mut template = Template::new(record.id, record.name, record.content)?;
        if record.variables != template.variables {
            tracing::debug!(
                template = %template.id,
                stored = ?record.variables,
                derived = ?template.variables,
                "stored variable list is stale; using derived list"
            );
        }
        template.description = record.description;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(variables: &[&str]) -> TemplateRecord {
        TemplateRecord {
            id: "tpl-1".to_string(),
            name: "ATO Letter".to_string(),
            content: "{{ system }} is authorized by {{ official }}.".to_string(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
            description: Some("Standard letter".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_stale_record_variables_are_recomputed() {
        let template = Template::try_from(record(&["old", "system"])).unwrap();
        assert_eq!(template.variables(), ["system", "official"]);
        assert_eq!(template.description(), Some("Standard letter"));
    }

    #[test]
    fn test_missing_record_variables_are_recomputed() {
        let template = Template::try_from(record(&[])).unwrap();
        assert_eq!(template.variables(), ["system", "official"]);
    }

    #[test]
    fn test_set_content_recomputes() {
        let mut template = Template::new("t", "Memo", "{{ a }}").unwrap();
        template.set_content("{{ b }} then {{ a }}");
        assert_eq!(template.variables(), ["b", "a"]);

        template.set_content("no slots");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(
            Template::new("t", "  ", "x"),
            Err(TemplateError::EmptyName)
        ));
    }

    #[test]
    fn test_upsert_carries_derived_variables() {
        let template = Template::new("t", "Memo", "{{ x }} {{ y }} {{ x }}").unwrap();
        let upsert = template.to_upsert();
        assert_eq!(upsert.variables, vec!["x", "y"]);
        assert_eq!(upsert.name, "Memo");
    }

    #[test]
    fn test_complete_and_completion() {
        let template = Template::new("t", "Memo", "Dear {{ who }},").unwrap();
        let values: VariableValues = [("who", "Ops")].into_iter().collect();
        assert_eq!(template.complete(&values), "Dear Ops,");
        assert_eq!(template.completion(&values).percentage(), 100.0);
    }
}
