//! Authorization template engine
//!
//! This crate holds the text core of the authoring flows:
//! - Variable extraction (`{{ name }}` placeholders, first-seen order)
//! - Single-pass substitution that keeps unfilled placeholders intact
//! - HTML preview rendering for a small markdown subset
//! - The `Template` domain type and the built-in template registry
//!
//! All text functions are pure and never fail; malformed input degrades to
//! literal output.

pub mod errors;
pub mod preview;
pub mod substitute;
pub mod template;
pub mod templates;
pub mod values;
pub mod variables;

pub use errors::{Result, TemplateError};
pub use preview::{render_completed, render_preview, PLACEHOLDER_CLASS};
pub use substitute::{completion, substitute, unfilled_variables, Completion};
pub use template::Template;
pub use templates::{builtin_template, get_template_source, list_templates, TemplateInfo};
pub use values::{values_from_json, values_from_value};
pub use variables::{
    count_placeholders, extract_variables, find_placeholders, has_variables, Placeholder,
};

pub use oscal_types::VariableValues;
