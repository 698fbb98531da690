//! Authorization wizard state
//!
//! The wizard owns an editable copy of the selected template's content and
//! the values typed for its variables. Every content edit re-extracts the
//! variable list and adds empty entries for new names. Existing entries are
//! never dropped during a session, so a variable that is deleted and later
//! restored (undo/redo) keeps what the user typed.

use crate::errors::{Result, WizardError};
use crate::step::Step;
use oscal_types::{CreateAuthorizationRequest, VariableValues};
use serde::{Deserialize, Serialize};
use template_engine::{
    extract_variables, render_completed, substitute, Completion, Template,
};

/// Steps of the authorization wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStep {
    SelectTemplate,
    FillVariables,
    AttachDocuments,
    Review,
}

impl Step for AuthorizationStep {
    const ALL: &'static [Self] = &[
        AuthorizationStep::SelectTemplate,
        AuthorizationStep::FillVariables,
        AuthorizationStep::AttachDocuments,
        AuthorizationStep::Review,
    ];

    fn title(&self) -> &'static str {
        match self {
            AuthorizationStep::SelectTemplate => "Select Template",
            AuthorizationStep::FillVariables => "Fill Variables",
            AuthorizationStep::AttachDocuments => "Attach Documents",
            AuthorizationStep::Review => "Review",
        }
    }
}

/// Template chosen in the first step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SelectedTemplate {
    id: String,
    name: String,
    original_content: String,
}

/// Wizard state as saved in a draft. The variable list is not stored; it
/// is derived from `content` when the draft is restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WizardDraft")]
pub struct AuthorizationWizard {
    step: AuthorizationStep,
    name: String,
    template: Option<SelectedTemplate>,
    content: String,
    #[serde(skip)]
    variables: Vec<String>,
    values: VariableValues,
    ssp_file: Option<String>,
    sar_file: Option<String>,
}

#[derive(Deserialize)]
struct WizardDraft {
    step: AuthorizationStep,
    #[serde(default)]
    name: String,
    #[serde(default)]
    template: Option<SelectedTemplate>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    values: VariableValues,
    #[serde(default)]
    ssp_file: Option<String>,
    #[serde(default)]
    sar_file: Option<String>,
}

impl From<WizardDraft> for AuthorizationWizard {
    fn from(draft: WizardDraft) -> Self {
        let mut wizard = Self {
            step: draft.step,
            name: draft.name,
            template: draft.template,
            content: String::new(),
            variables: Vec::new(),
            values: draft.values,
            ssp_file: draft.ssp_file,
            sar_file: draft.sar_file,
        };
        wizard.set_content(draft.content);
        wizard
    }
}

impl AuthorizationWizard {
    pub fn new() -> Self {
        Self {
            step: AuthorizationStep::SelectTemplate,
            name: String::new(),
            template: None,
            content: String::new(),
            variables: Vec::new(),
            values: VariableValues::new(),
            ssp_file: None,
            sar_file: None,
        }
    }

    pub fn step(&self) -> AuthorizationStep {
        self.step
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.id.as_str())
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.name.as_str())
    }

    /// Choose a template; its content becomes the editable content
    pub fn select_template(&mut self, template: &Template) {
        self.template = Some(SelectedTemplate {
            id: template.id().to_string(),
            name: template.name().to_string(),
            original_content: template.content().to_string(),
        });
        self.set_content(template.content());
    }

    /// Current (possibly edited) template text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the editable content, re-extract and reconcile values
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.variables = extract_variables(&self.content);

        let mut added = 0;
        for name in &self.variables {
            if self.values.ensure(name) {
                added += 1;
            }
        }
        tracing::debug!(
            variables = self.variables.len(),
            added,
            "reconciled wizard variables"
        );
    }

    /// Discard edits and go back to the selected template's text
    pub fn reset_content(&mut self) {
        if let Some(original) = self.template.as_ref().map(|t| t.original_content.clone()) {
            self.set_content(original);
        }
    }

    pub fn is_content_edited(&self) -> bool {
        self.template
            .as_ref()
            .is_some_and(|t| t.original_content != self.content)
    }

    /// Variables of the current content, first-appearance order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// All typed values, including names no longer in the content
    pub fn values(&self) -> &VariableValues {
        &self.values
    }

    pub fn variable_value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.set(name, value);
    }

    pub fn ssp_file(&self) -> Option<&str> {
        self.ssp_file.as_deref()
    }

    pub fn set_ssp_file(&mut self, reference: Option<String>) {
        self.ssp_file = reference.filter(|r| !r.trim().is_empty());
    }

    pub fn sar_file(&self) -> Option<&str> {
        self.sar_file.as_deref()
    }

    pub fn set_sar_file(&mut self, reference: Option<String>) {
        self.sar_file = reference.filter(|r| !r.trim().is_empty());
    }

    /// Items still missing before `step` can be left
    pub fn missing_for(&self, step: AuthorizationStep) -> Vec<String> {
        match step {
            AuthorizationStep::SelectTemplate => {
                let mut missing = Vec::new();
                if self.template.is_none() {
                    missing.push("template".to_string());
                }
                if self.name.trim().is_empty() {
                    missing.push("name".to_string());
                }
                missing
            }
            AuthorizationStep::FillVariables => self
                .variables
                .iter()
                .filter(|name| !self.values.is_filled(name))
                .cloned()
                .collect(),
            AuthorizationStep::AttachDocuments => {
                if self.ssp_file.is_none() {
                    vec!["ssp".to_string()]
                } else {
                    Vec::new()
                }
            }
            AuthorizationStep::Review => Vec::new(),
        }
    }

    /// Whether the current step's requirements are met
    pub fn can_proceed(&self) -> bool {
        self.missing_for(self.step).is_empty()
    }

    pub fn completion(&self) -> Completion {
        Completion::of(&self.variables, &self.values)
    }

    /// Share of variables with a value; 100 when there are none
    pub fn completion_percentage(&self) -> f64 {
        self.completion().percentage()
    }

    /// Advance to the next step if the current one is complete
    pub fn next(&mut self) -> Result<AuthorizationStep> {
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.check(self.step)?;
        tracing::debug!(from = ?self.step, to = ?next, "wizard step forward");
        self.step = next;
        Ok(next)
    }

    /// Return to the previous step; never gated
    pub fn back(&mut self) -> Result<AuthorizationStep> {
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.step = previous;
        Ok(previous)
    }

    fn check(&self, step: AuthorizationStep) -> Result<()> {
        let missing = self.missing_for(step);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Incomplete {
                step: step.title(),
                missing,
            })
        }
    }

    /// Content with the current values substituted
    pub fn completed_document(&self) -> String {
        substitute(&self.content, &self.values)
    }

    /// HTML preview of the completed document
    pub fn preview_html(&self) -> String {
        render_completed(&self.content, &self.values)
    }

    /// Snapshot for `POST /api/authorizations`.
    ///
    /// Only values for variables present in the content are included.
    pub fn build_request(&self) -> Result<CreateAuthorizationRequest> {
        for step in [
            AuthorizationStep::SelectTemplate,
            AuthorizationStep::FillVariables,
            AuthorizationStep::AttachDocuments,
        ] {
            self.check(step)?;
        }

        let template = self.template.as_ref().ok_or_else(|| WizardError::Incomplete {
            step: AuthorizationStep::SelectTemplate.title(),
            missing: vec!["template".to_string()],
        })?;
        let ssp_file = self.ssp_file.clone().ok_or_else(|| WizardError::Incomplete {
            step: AuthorizationStep::AttachDocuments.title(),
            missing: vec!["ssp".to_string()],
        })?;

        let variable_values = self
            .variables
            .iter()
            .map(|name| (name.clone(), self.values.get(name).to_string()))
            .collect();

        Ok(CreateAuthorizationRequest {
            name: self.name.trim().to_string(),
            template_id: template.id.clone(),
            variable_values,
            edited_content: self.content.clone(),
            completed_content: self.completed_document(),
            ssp_file,
            sar_file: self.sar_file.clone(),
        })
    }

    /// Drop all session state
    pub fn cancel(&mut self) {
        *self = Self::new();
    }
}

impl Default for AuthorizationWizard {
    fn default() -> Self {
        Self::new()
    }
}
