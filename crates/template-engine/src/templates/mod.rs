//! Built-in authorization templates

pub mod embedded;
pub mod registry;

pub use registry::{
    builtin_template, get_template_source, is_builtin_uri, list_templates, parse_builtin_uri,
    TemplateInfo,
};
