//! End-to-end checks over the public API: extract, fill, render

use pretty_assertions::assert_eq;
use template_engine::{
    builtin_template, completion, extract_variables, list_templates, render_completed,
    render_preview, substitute, unfilled_variables, VariableValues, PLACEHOLDER_CLASS,
};

fn values(pairs: &[(&str, &str)]) -> VariableValues {
    pairs.iter().copied().collect()
}

// ============================================================
// Documented properties
// ============================================================

#[test]
fn documented_extraction_examples() {
    assert!(extract_variables("").is_empty());
    assert_eq!(
        extract_variables("{{ a }} and {{ b }} and {{ a }}"),
        vec!["a", "b"]
    );
    assert_eq!(
        extract_variables("{{ Low, Moderate, or High }}"),
        vec!["Low, Moderate, or High"]
    );
}

#[test]
fn documented_substitution_examples() {
    assert_eq!(
        substitute("Hello {{ name }}", &values(&[("name", "World")])),
        "Hello World"
    );
    assert_eq!(
        substitute("Hello {{ name }}", &values(&[("name", "")])),
        "Hello {{ name }}"
    );
}

#[test]
fn documented_completion_examples() {
    assert_eq!(completion("plain", &VariableValues::new()).percentage(), 100.0);
    assert_eq!(
        completion("{{ a }} {{ b }}", &values(&[("b", "set")])).percentage(),
        50.0
    );
}

// ============================================================
// Built-in templates
// ============================================================

#[test]
fn fully_filled_builtin_renders_without_marks() {
    let template = builtin_template("risk_acceptance").unwrap();
    let vals: VariableValues = template
        .variables()
        .iter()
        .map(|name| (name.clone(), format!("value for {}", name)))
        .collect();

    let completed = template.complete(&vals);
    assert!(extract_variables(&completed).is_empty());

    let html = render_completed(template.content(), &vals);
    assert!(!html.contains(PLACEHOLDER_CLASS));
    assert!(html.starts_with("<h1>Risk Acceptance Memorandum</h1>"));
    assert!(html.contains("value for compensating controls"));
}

#[test]
fn partially_filled_builtin_marks_the_rest() {
    let template = builtin_template("interim_ato").unwrap();
    let vals = values(&[("system name", "Payroll"), ("date", "2024-06-01")]);

    let missing = unfilled_variables(template.content(), &vals);
    assert!(!missing.contains(&"system name".to_string()));
    assert!(missing.contains(&"authorizing official".to_string()));

    let html = render_completed(template.content(), &vals);
    let marks = html.matches(PLACEHOLDER_CLASS).count();
    // authorizing official appears twice in the interim letter
    assert_eq!(
        marks,
        template_engine::count_placeholders(&template.complete(&vals))
    );
    assert!(html.contains("Payroll"));
}

#[test]
fn every_builtin_renders() {
    for info in list_templates() {
        let template = builtin_template(&info.name).unwrap();
        let html = render_preview(template.content());
        assert!(html.starts_with("<h1>"), "{} should open with a header", info.name);
        assert!(!info.variables.is_empty());
    }
}
