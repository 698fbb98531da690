//! Error types for wizard navigation and output

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step '{step}' is incomplete: missing {}", .missing.join(", "))]
    Incomplete {
        step: &'static str,
        missing: Vec<String>,
    },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the last step")]
    AtLastStep,

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, WizardError>;
