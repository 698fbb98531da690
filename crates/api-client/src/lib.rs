//! REST client for the OSCAL authoring backend
//!
//! Thin async wrapper over the backend endpoints. Responses are decoded into
//! the `oscal-types` structs at the boundary; templates are converted to the
//! engine's `Template` so their variable lists are always recomputed from
//! content.
//!
//! The bearer token lives in an injected [`SessionStore`], which keeps the
//! client independent of where the token is persisted (memory for native
//! callers, `localStorage` in the browser).

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod session;

pub use client::OscalClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use models::{HealthStatus, LoginRequest, LoginResponse};
pub use session::{MemorySession, SessionStore};
