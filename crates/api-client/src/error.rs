//! Error types for backend calls

use template_engine::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid template: {0}")]
    Template(#[from] TemplateError),
}

impl ApiError {
    /// The backend could not be reached at all (no HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
