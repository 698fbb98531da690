//! Offline answers from the built-in template registry
//!
//! Used only when mock fallback is enabled and the backend cannot be
//! reached. HTTP errors from a live backend are never masked.

use crate::error::{ApiError, Result};
use crate::models::HealthStatus;
use template_engine::{builtin_template, list_templates, Template, TemplateError};

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "mock".to_string(),
        version: None,
    }
}

pub fn templates() -> Result<Vec<Template>> {
    list_templates()
        .iter()
        .map(|info| builtin_template(&info.name).map_err(ApiError::from))
        .collect()
}

pub fn template(id: &str) -> Result<Template> {
    match builtin_template(id) {
        Ok(template) => Ok(template),
        Err(TemplateError::TemplateNotFound(name)) => Err(ApiError::Status {
            status: 404,
            message: format!("Template not found: {}", name),
        }),
        Err(e) => Err(e.into()),
    }
}
