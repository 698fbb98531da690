//! Wizard bindings
//!
//! Thin wrappers over `wizard-core`; structured results cross the boundary
//! as JSON strings.

use oscal_types::TemplateRecord;
use serde::Serialize;
use template_engine::{builtin_template, Template};
use wasm_bindgen::prelude::*;
use wizard_core::{
    AuthorizationWizard, ComponentBuilderWizard, ComponentType, Step, WizardError,
};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// Wire name of a step, e.g. `fill_variables`
fn step_name<T: Serialize>(step: &T) -> String {
    serde_json::to_value(step)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn template_from_json(json: &str) -> Result<Template, String> {
    let record: TemplateRecord =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse template: {}", e))?;
    Template::try_from(record).map_err(|e| e.to_string())
}

fn wizard_result<T>(result: Result<T, WizardError>) -> Result<T, JsValue> {
    result.map_err(js_error)
}

#[wasm_bindgen(js_name = AuthorizationWizard)]
pub struct WasmAuthorizationWizard {
    wizard: AuthorizationWizard,
}

#[allow(clippy::derivable_impls)]
impl Default for WasmAuthorizationWizard {
    fn default() -> Self {
        Self {
            wizard: AuthorizationWizard::new(),
        }
    }
}

impl WasmAuthorizationWizard {
    pub fn inner(&self) -> &AuthorizationWizard {
        &self.wizard
    }
}

#[wasm_bindgen(js_class = AuthorizationWizard)]
impl WasmAuthorizationWizard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a draft produced by `toJson`
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmAuthorizationWizard, JsValue> {
        let wizard = serde_json::from_str(json).map_err(js_error)?;
        Ok(Self { wizard })
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.wizard)
    }

    pub fn step(&self) -> String {
        step_name(&self.wizard.step())
    }

    #[wasm_bindgen(js_name = stepTitle)]
    pub fn step_title(&self) -> String {
        self.wizard.step().title().to_string()
    }

    #[wasm_bindgen(js_name = stepIndex)]
    pub fn step_index(&self) -> usize {
        self.wizard.step().index()
    }

    pub fn name(&self) -> String {
        self.wizard.name().to_string()
    }

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: String) {
        self.wizard.set_name(name);
    }

    #[wasm_bindgen(js_name = selectBuiltinTemplate)]
    pub fn select_builtin_template(&mut self, name: &str) -> Result<(), JsValue> {
        let template = builtin_template(name).map_err(js_error)?;
        self.wizard.select_template(&template);
        Ok(())
    }

    /// Select a template fetched from the backend (`TemplateRecord` JSON)
    #[wasm_bindgen(js_name = selectTemplate)]
    pub fn select_template(&mut self, template_json: &str) -> Result<(), JsValue> {
        let template = template_from_json(template_json).map_err(|e| JsValue::from_str(&e))?;
        self.wizard.select_template(&template);
        Ok(())
    }

    pub fn content(&self) -> String {
        self.wizard.content().to_string()
    }

    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, content: String) {
        self.wizard.set_content(content);
    }

    #[wasm_bindgen(js_name = resetContent)]
    pub fn reset_content(&mut self) {
        self.wizard.reset_content();
    }

    #[wasm_bindgen(js_name = isContentEdited)]
    pub fn is_content_edited(&self) -> bool {
        self.wizard.is_content_edited()
    }

    #[wasm_bindgen(js_name = getVariablesJson)]
    pub fn get_variables_json(&self) -> Result<String, JsValue> {
        to_json(self.wizard.variables())
    }

    #[wasm_bindgen(js_name = getValuesJson)]
    pub fn get_values_json(&self) -> Result<String, JsValue> {
        to_json(self.wizard.values())
    }

    #[wasm_bindgen(js_name = variableValue)]
    pub fn variable_value(&self, name: &str) -> String {
        self.wizard.variable_value(name).to_string()
    }

    #[wasm_bindgen(js_name = setVariable)]
    pub fn set_variable(&mut self, name: String, value: String) {
        self.wizard.set_variable(name, value);
    }

    #[wasm_bindgen(js_name = setSspFile)]
    pub fn set_ssp_file(&mut self, reference: Option<String>) {
        self.wizard.set_ssp_file(reference);
    }

    #[wasm_bindgen(js_name = setSarFile)]
    pub fn set_sar_file(&mut self, reference: Option<String>) {
        self.wizard.set_sar_file(reference);
    }

    #[wasm_bindgen(js_name = canProceed)]
    pub fn can_proceed(&self) -> bool {
        self.wizard.can_proceed()
    }

    /// Missing items of the current step as a JSON array
    #[wasm_bindgen(js_name = getMissingJson)]
    pub fn get_missing_json(&self) -> Result<String, JsValue> {
        to_json(&self.wizard.missing_for(self.wizard.step()))
    }

    #[wasm_bindgen(js_name = completionPercentage)]
    pub fn completion_percentage(&self) -> f64 {
        self.wizard.completion_percentage()
    }

    /// Advance; returns the new step name
    pub fn next(&mut self) -> Result<String, JsValue> {
        wizard_result(self.wizard.next()).map(|step| step_name(&step))
    }

    pub fn back(&mut self) -> Result<String, JsValue> {
        wizard_result(self.wizard.back()).map(|step| step_name(&step))
    }

    #[wasm_bindgen(js_name = previewHtml)]
    pub fn preview_html(&self) -> String {
        self.wizard.preview_html()
    }

    #[wasm_bindgen(js_name = completedDocument)]
    pub fn completed_document(&self) -> String {
        self.wizard.completed_document()
    }

    /// `CreateAuthorizationRequest` JSON for submission
    #[wasm_bindgen(js_name = buildRequestJson)]
    pub fn build_request_json(&self) -> Result<String, JsValue> {
        let request = wizard_result(self.wizard.build_request())?;
        to_json(&request)
    }

    pub fn cancel(&mut self) {
        self.wizard.cancel();
    }
}

#[wasm_bindgen(js_name = ComponentBuilder)]
pub struct WasmComponentBuilder {
    wizard: ComponentBuilderWizard,
}

#[allow(clippy::derivable_impls)]
impl Default for WasmComponentBuilder {
    fn default() -> Self {
        Self {
            wizard: ComponentBuilderWizard::new(),
        }
    }
}

#[wasm_bindgen(js_class = ComponentBuilder)]
impl WasmComponentBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> String {
        step_name(&self.wizard.step())
    }

    #[wasm_bindgen(js_name = setTitle)]
    pub fn set_title(&mut self, title: String) {
        self.wizard.set_title(title);
    }

    #[wasm_bindgen(js_name = setVersion)]
    pub fn set_version(&mut self, version: String) {
        self.wizard.set_version(version);
    }

    #[wasm_bindgen(js_name = setDescription)]
    pub fn set_description(&mut self, description: String) {
        self.wizard.set_description(description);
    }

    #[wasm_bindgen(js_name = setSource)]
    pub fn set_source(&mut self, source: String) {
        self.wizard.set_source(source);
    }

    /// Returns the new component's id
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(
        &mut self,
        component_type: &str,
        title: String,
        description: String,
    ) -> Result<String, JsValue> {
        let component_type = ComponentType::parse(component_type).ok_or_else(|| {
            JsValue::from_str(&format!("Unknown component type: {}", component_type))
        })?;
        Ok(self.wizard.add_component(component_type, title, description))
    }

    #[wasm_bindgen(js_name = removeComponent)]
    pub fn remove_component(&mut self, id: &str) -> Result<(), JsValue> {
        wizard_result(self.wizard.remove_component(id)).map(|_| ())
    }

    #[wasm_bindgen(js_name = addControl)]
    pub fn add_control(
        &mut self,
        component_id: &str,
        control_id: &str,
        description: String,
    ) -> Result<String, JsValue> {
        wizard_result(self.wizard.add_control(component_id, control_id, description))
    }

    #[wasm_bindgen(js_name = removeControl)]
    pub fn remove_control(&mut self, component_id: &str, control_ref: &str) -> Result<(), JsValue> {
        wizard_result(self.wizard.remove_control(component_id, control_ref))
    }

    #[wasm_bindgen(js_name = getComponentsJson)]
    pub fn get_components_json(&self) -> Result<String, JsValue> {
        to_json(self.wizard.components())
    }

    #[wasm_bindgen(js_name = canProceed)]
    pub fn can_proceed(&self) -> bool {
        self.wizard.can_proceed()
    }

    #[wasm_bindgen(js_name = getMissingJson)]
    pub fn get_missing_json(&self) -> Result<String, JsValue> {
        to_json(&self.wizard.missing_for(self.wizard.step()))
    }

    pub fn next(&mut self) -> Result<String, JsValue> {
        wizard_result(self.wizard.next()).map(|step| step_name(&step))
    }

    pub fn back(&mut self) -> Result<String, JsValue> {
        wizard_result(self.wizard.back()).map(|step| step_name(&step))
    }

    /// Pretty-printed OSCAL component definition
    pub fn build(&self) -> Result<String, JsValue> {
        let document = wizard_result(self.wizard.build())?;
        serde_json::to_string_pretty(&document).map_err(js_error)
    }

    pub fn cancel(&mut self) {
        self.wizard.cancel();
    }
}
