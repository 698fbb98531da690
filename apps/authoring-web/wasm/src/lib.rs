//! Browser bindings for the authoring UI
//!
//! Text functions take and return JSON strings; values are passed as a JSON
//! object of `name -> value`.

use template_engine::{
    builtin_template, completion, extract_variables, list_templates, render_completed,
    render_preview, substitute, values_from_json, VariableValues,
};
use wasm_bindgen::prelude::*;

pub mod client;
pub mod storage;
pub mod wizard;

pub use client::WasmClient;
pub use storage::LocalStorageSession;
pub use wizard::{WasmAuthorizationWizard, WasmComponentBuilder};

fn parse_values(values_json: &str) -> Result<VariableValues, String> {
    if values_json.trim().is_empty() {
        return Ok(VariableValues::new());
    }
    values_from_json(values_json).map_err(|e| e.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize: {}", e))
}

fn builtin_template_json(name: &str) -> Result<String, String> {
    let template = builtin_template(name).map_err(|e| e.to_string())?;
    to_json(&template)
}

/// Install the panic hook; called once by the UI on load
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Distinct variable names as a JSON array, first-appearance order
#[wasm_bindgen(js_name = extractVariables)]
pub fn extract_variables_wasm(text: &str) -> Result<String, JsValue> {
    to_json(&extract_variables(text)).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = substituteVariables)]
pub fn substitute_variables_wasm(text: &str, values_json: &str) -> Result<String, JsValue> {
    let values = parse_values(values_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(substitute(text, &values))
}

/// HTML preview with placeholders highlighted
#[wasm_bindgen(js_name = renderPreview)]
pub fn render_preview_wasm(text: &str) -> String {
    render_preview(text)
}

#[wasm_bindgen(js_name = renderCompleted)]
pub fn render_completed_wasm(text: &str, values_json: &str) -> Result<String, JsValue> {
    let values = parse_values(values_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(render_completed(text, &values))
}

#[wasm_bindgen(js_name = completionPercentage)]
pub fn completion_percentage_wasm(text: &str, values_json: &str) -> Result<f64, JsValue> {
    let values = parse_values(values_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(completion(text, &values).percentage())
}

#[wasm_bindgen(js_name = listBuiltinTemplates)]
pub fn list_builtin_templates_wasm() -> Result<String, JsValue> {
    to_json(&list_templates()).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = getBuiltinTemplate)]
pub fn get_builtin_template_wasm(name: &str) -> Result<String, JsValue> {
    builtin_template_json(name).map_err(|e| JsValue::from_str(&e))
}
