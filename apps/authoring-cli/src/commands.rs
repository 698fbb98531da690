//! Offline commands

use anyhow::{bail, Context};
use oscal_types::CreateAuthorizationRequest;
use template_engine::{
    completion, extract_variables, list_templates, render_completed, render_preview, substitute,
    unfilled_variables, Template, VariableValues,
};
use wizard_core::AuthorizationWizard;

/// Variables of `text`, one per line, or a JSON array
pub fn variables_report(text: &str, json: bool) -> anyhow::Result<String> {
    let variables = extract_variables(text);
    if json {
        return Ok(serde_json::to_string_pretty(&variables)?);
    }
    Ok(variables.join("\n"))
}

/// Substitute `values` into `text`.
///
/// With `strict`, any variable left without a value is an error.
pub fn fill(text: &str, values: &VariableValues, strict: bool) -> anyhow::Result<String> {
    if strict {
        let missing = unfilled_variables(text, values);
        if !missing.is_empty() {
            bail!("Missing values for: {}", missing.join(", "));
        }
    }
    let progress = completion(text, values);
    tracing::info!(
        filled = progress.filled,
        total = progress.total,
        "filled template"
    );
    Ok(substitute(text, values))
}

/// HTML preview, filled when values are given
pub fn preview(text: &str, values: Option<&VariableValues>) -> String {
    match values {
        Some(values) => render_completed(text, values),
        None => render_preview(text),
    }
}

/// Table of the built-in templates
pub fn builtin_listing() -> String {
    let templates = list_templates();
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            format!(
                "{:width$}  {} ({} variables)",
                t.name,
                t.title,
                t.variables.len(),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the authorization wizard non-interactively and return the request
/// to submit
pub fn authorization_request(
    template: &Template,
    name: &str,
    values: &VariableValues,
    ssp_file: &str,
    sar_file: Option<&str>,
) -> anyhow::Result<CreateAuthorizationRequest> {
    let mut wizard = AuthorizationWizard::new();
    wizard.set_name(name);
    wizard.select_template(template);
    for (variable, value) in values.iter() {
        wizard.set_variable(variable, value);
    }
    wizard.set_ssp_file(Some(ssp_file.to_string()));
    wizard.set_sar_file(sar_file.map(str::to_string));

    wizard
        .build_request()
        .with_context(|| format!("Cannot submit authorization '{}'", name))
}
