//! Component definition builder wizard
//!
//! Collects metadata, components and the controls each component
//! implements, then emits an OSCAL `component-definition` document.

use crate::errors::{Result, WizardError};
use crate::step::Step;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// OSCAL version written into generated metadata
pub const OSCAL_VERSION: &str = "1.1.2";

/// Steps of the component builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStep {
    Metadata,
    Components,
    Controls,
    Review,
}

impl Step for ComponentStep {
    const ALL: &'static [Self] = &[
        ComponentStep::Metadata,
        ComponentStep::Components,
        ComponentStep::Controls,
        ComponentStep::Review,
    ];

    fn title(&self) -> &'static str {
        match self {
            ComponentStep::Metadata => "Metadata",
            ComponentStep::Components => "Components",
            ComponentStep::Controls => "Controls",
            ComponentStep::Review => "Review",
        }
    }
}

/// OSCAL component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Software,
    Hardware,
    Service,
    Policy,
    Process,
    Procedure,
    Plan,
    Guidance,
    Standard,
    Validation,
    #[serde(rename = "this-system")]
    This,
}

impl ComponentType {
    /// Parse component type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "software" => Some(ComponentType::Software),
            "hardware" => Some(ComponentType::Hardware),
            "service" => Some(ComponentType::Service),
            "policy" => Some(ComponentType::Policy),
            "process" => Some(ComponentType::Process),
            "procedure" => Some(ComponentType::Procedure),
            "plan" => Some(ComponentType::Plan),
            "guidance" => Some(ComponentType::Guidance),
            "standard" => Some(ComponentType::Standard),
            "validation" => Some(ComponentType::Validation),
            "this-system" | "this" => Some(ComponentType::This),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Software => "software",
            ComponentType::Hardware => "hardware",
            ComponentType::Service => "service",
            ComponentType::Policy => "policy",
            ComponentType::Process => "process",
            ComponentType::Procedure => "procedure",
            ComponentType::Plan => "plan",
            ComponentType::Guidance => "guidance",
            ComponentType::Standard => "standard",
            ComponentType::Validation => "validation",
            ComponentType::This => "this-system",
        }
    }
}

/// A control requirement satisfied by a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlImplementation {
    pub id: String,
    /// Control identifier, e.g. `ac-2`
    pub control_id: String,
    pub description: String,
}

/// A component being described in the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDraft {
    pub id: String,
    pub component_type: ComponentType,
    pub title: String,
    pub description: String,
    pub controls: Vec<ControlImplementation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBuilderWizard {
    step: ComponentStep,
    title: String,
    version: String,
    description: String,
    /// Catalog or profile the control ids come from
    source: String,
    components: Vec<ComponentDraft>,
}

impl ComponentBuilderWizard {
    pub fn new() -> Self {
        Self {
            step: ComponentStep::Metadata,
            title: String::new(),
            version: "1.0.0".to_string(),
            description: String::new(),
            source: String::new(),
            components: Vec::new(),
        }
    }

    pub fn step(&self) -> ComponentStep {
        self.step
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn components(&self) -> &[ComponentDraft] {
        &self.components
    }

    /// Add a component and return its id
    pub fn add_component(
        &mut self,
        component_type: ComponentType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.components.push(ComponentDraft {
            id: id.clone(),
            component_type,
            title: title.into(),
            description: description.into(),
            controls: Vec::new(),
        });
        id
    }

    pub fn component_mut(&mut self, id: &str) -> Result<&mut ComponentDraft> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| WizardError::ComponentNotFound(id.to_string()))
    }

    pub fn remove_component(&mut self, id: &str) -> Result<ComponentDraft> {
        let index = self
            .components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| WizardError::ComponentNotFound(id.to_string()))?;
        Ok(self.components.remove(index))
    }

    /// Attach a control to a component; ids are stored lowercase
    pub fn add_control(
        &mut self,
        component_id: &str,
        control_id: &str,
        description: impl Into<String>,
    ) -> Result<String> {
        let control_id = control_id.trim().to_lowercase();
        if control_id.is_empty() {
            return Err(WizardError::InvalidArgument(
                "control id must not be empty".to_string(),
            ));
        }
        let component = self.component_mut(component_id)?;
        if component.controls.iter().any(|c| c.control_id == control_id) {
            return Err(WizardError::InvalidArgument(format!(
                "control {} already added to {}",
                control_id, component.title
            )));
        }
        let id = Uuid::new_v4().to_string();
        component.controls.push(ControlImplementation {
            id: id.clone(),
            control_id,
            description: description.into(),
        });
        Ok(id)
    }

    pub fn remove_control(&mut self, component_id: &str, control_ref: &str) -> Result<()> {
        let component = self.component_mut(component_id)?;
        component.controls.retain(|c| c.id != control_ref);
        Ok(())
    }

    /// Items still missing before `step` can be left
    pub fn missing_for(&self, step: ComponentStep) -> Vec<String> {
        let mut missing = Vec::new();
        match step {
            ComponentStep::Metadata => {
                if self.title.trim().is_empty() {
                    missing.push("title".to_string());
                }
                if self.version.trim().is_empty() {
                    missing.push("version".to_string());
                }
            }
            ComponentStep::Components => {
                if self.components.is_empty() {
                    missing.push("component".to_string());
                }
                for (i, component) in self.components.iter().enumerate() {
                    if component.title.trim().is_empty() {
                        missing.push(format!("component {} title", i + 1));
                    }
                    if component.description.trim().is_empty() {
                        missing.push(format!("component {} description", i + 1));
                    }
                }
            }
            ComponentStep::Controls => {
                let has_controls = self.components.iter().any(|c| !c.controls.is_empty());
                if has_controls && self.source.trim().is_empty() {
                    missing.push("source".to_string());
                }
            }
            ComponentStep::Review => {}
        }
        missing
    }

    pub fn can_proceed(&self) -> bool {
        self.missing_for(self.step).is_empty()
    }

    pub fn next(&mut self) -> Result<ComponentStep> {
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        let missing = self.missing_for(self.step);
        if !missing.is_empty() {
            return Err(WizardError::Incomplete {
                step: self.step.title(),
                missing,
            });
        }
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<ComponentStep> {
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.step = previous;
        Ok(previous)
    }

    /// Build the component definition stamped with the current time
    pub fn build(&self) -> Result<serde_json::Value> {
        self.build_at(Utc::now())
    }

    /// Build the component definition with an explicit `last-modified`
    pub fn build_at(&self, last_modified: DateTime<Utc>) -> Result<serde_json::Value> {
        for step in [
            ComponentStep::Metadata,
            ComponentStep::Components,
            ComponentStep::Controls,
        ] {
            let missing = self.missing_for(step);
            if !missing.is_empty() {
                return Err(WizardError::Incomplete {
                    step: step.title(),
                    missing,
                });
            }
        }

        let document = ComponentDefinitionDocument {
            component_definition: ComponentDefinition {
                uuid: Uuid::new_v4().to_string(),
                metadata: Metadata {
                    title: self.title.trim().to_string(),
                    last_modified: last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
                    version: self.version.trim().to_string(),
                    oscal_version: OSCAL_VERSION,
                    remarks: Some(self.description.trim().to_string())
                        .filter(|d| !d.is_empty()),
                },
                components: self
                    .components
                    .iter()
                    .map(|c| self.component_json(c))
                    .collect(),
            },
        };

        serde_json::to_value(&document)
            .map_err(|e| WizardError::InvalidArgument(format!("serialization failed: {}", e)))
    }

    fn component_json<'a>(&'a self, component: &'a ComponentDraft) -> Component<'a> {
        let control_implementations = if component.controls.is_empty() {
            Vec::new()
        } else {
            vec![ControlImplementationSet {
                uuid: Uuid::new_v4().to_string(),
                source: self.source.trim(),
                description: format!("Controls implemented by {}", component.title.trim()),
                implemented_requirements: component
                    .controls
                    .iter()
                    .map(|c| ImplementedRequirement {
                        uuid: &c.id,
                        control_id: &c.control_id,
                        description: &c.description,
                    })
                    .collect(),
            }]
        };

        Component {
            uuid: &component.id,
            component_type: component.component_type.as_str(),
            title: component.title.trim(),
            description: component.description.trim(),
            control_implementations,
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::new();
    }
}

impl Default for ComponentBuilderWizard {
    fn default() -> Self {
        Self::new()
    }
}

// OSCAL JSON shapes

#[derive(Serialize)]
struct ComponentDefinitionDocument<'a> {
    #[serde(rename = "component-definition")]
    component_definition: ComponentDefinition<'a>,
}

#[derive(Serialize)]
struct ComponentDefinition<'a> {
    uuid: String,
    metadata: Metadata,
    components: Vec<Component<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Metadata {
    title: String,
    last_modified: String,
    version: String,
    oscal_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Component<'a> {
    uuid: &'a str,
    #[serde(rename = "type")]
    component_type: &'static str,
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    control_implementations: Vec<ControlImplementationSet<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ControlImplementationSet<'a> {
    uuid: String,
    source: &'a str,
    description: String,
    implemented_requirements: Vec<ImplementedRequirement<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ImplementedRequirement<'a> {
    uuid: &'a str,
    control_id: &'a str,
    description: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn filled_wizard() -> (ComponentBuilderWizard, String) {
        let mut wizard = ComponentBuilderWizard::new();
        wizard.set_title("Identity Provider");
        wizard.set_source("https://example.gov/profiles/moderate.json");
        let id = wizard.add_component(
            ComponentType::Service,
            "Okta",
            "Hosted single sign-on service",
        );
        wizard
            .add_control(&id, " AC-2 ", "Accounts are provisioned through SCIM")
            .unwrap();
        (wizard, id)
    }

    #[test]
    fn test_metadata_gate() {
        let mut wizard = ComponentBuilderWizard::new();
        wizard.set_version("");
        assert_eq!(
            wizard.next(),
            Err(WizardError::Incomplete {
                step: "Metadata",
                missing: vec!["title".to_string(), "version".to_string()],
            })
        );
        wizard.set_title("IdP");
        wizard.set_version("2.0");
        assert_eq!(wizard.next(), Ok(ComponentStep::Components));
    }

    #[test]
    fn test_components_gate_requires_descriptions() {
        let mut wizard = ComponentBuilderWizard::new();
        wizard.set_title("IdP");
        wizard.next().unwrap();
        assert!(!wizard.can_proceed());

        wizard.add_component(ComponentType::Software, "Agent", "");
        assert_eq!(
            wizard.missing_for(ComponentStep::Components),
            vec!["component 1 description"]
        );
    }

    #[test]
    fn test_controls_are_normalized_and_unique() {
        let (mut wizard, id) = filled_wizard();
        let component = &wizard.components()[0];
        assert_eq!(component.controls[0].control_id, "ac-2");

        assert!(matches!(
            wizard.add_control(&id, "ac-2", "again"),
            Err(WizardError::InvalidArgument(_))
        ));
        assert!(matches!(
            wizard.add_control(&id, "  ", "blank"),
            Err(WizardError::InvalidArgument(_))
        ));
        assert!(matches!(
            wizard.add_control("missing", "ac-3", ""),
            Err(WizardError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_controls_need_a_source() {
        let (mut wizard, _) = filled_wizard();
        wizard.set_source(" ");
        assert_eq!(wizard.missing_for(ComponentStep::Controls), vec!["source"]);
    }

    #[test]
    fn test_build_component_definition() {
        let (wizard, id) = filled_wizard();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let doc = wizard.build_at(at).unwrap();

        let def = &doc["component-definition"];
        assert_eq!(def["metadata"]["title"], "Identity Provider");
        assert_eq!(def["metadata"]["last-modified"], "2024-06-01T12:00:00Z");
        assert_eq!(def["metadata"]["oscal-version"], OSCAL_VERSION);
        assert!(def["metadata"].get("remarks").is_none());

        let component = &def["components"][0];
        assert_eq!(component["uuid"], id.as_str());
        assert_eq!(component["type"], "service");
        let implementation = &component["control-implementations"][0];
        assert_eq!(
            implementation["source"],
            "https://example.gov/profiles/moderate.json"
        );
        assert_eq!(
            implementation["implemented-requirements"][0]["control-id"],
            "ac-2"
        );
    }

    #[test]
    fn test_component_without_controls_omits_implementations() {
        let mut wizard = ComponentBuilderWizard::new();
        wizard.set_title("Policies");
        wizard.add_component(ComponentType::Policy, "Access Policy", "Org-wide policy");
        let doc = wizard.build().unwrap();
        let component = &doc["component-definition"]["components"][0];
        assert!(component.get("control-implementations").is_none());
    }

    #[test]
    fn test_remove_component() {
        let (mut wizard, id) = filled_wizard();
        let removed = wizard.remove_component(&id).unwrap();
        assert_eq!(removed.title, "Okta");
        assert!(wizard.components().is_empty());
        assert!(wizard.build().is_err());
    }

    #[test]
    fn test_component_type_serializes_like_oscal() {
        for component_type in [
            ComponentType::Software,
            ComponentType::Service,
            ComponentType::This,
        ] {
            let json = serde_json::to_value(component_type).unwrap();
            assert_eq!(json, component_type.as_str());
        }

        let (mut wizard, id) = filled_wizard();
        wizard.component_mut(&id).unwrap().component_type = ComponentType::This;
        let drafts = serde_json::to_value(wizard.components()).unwrap();
        let doc = wizard.build().unwrap();
        assert_eq!(drafts[0]["component_type"], "this-system");
        assert_eq!(doc["component-definition"]["components"][0]["type"], "this-system");
    }

    #[test]
    fn test_component_type_parse() {
        assert_eq!(ComponentType::parse("Service"), Some(ComponentType::Service));
        assert_eq!(ComponentType::parse("this-system"), Some(ComponentType::This));
        assert_eq!(ComponentType::parse("robot"), None);
    }
}
