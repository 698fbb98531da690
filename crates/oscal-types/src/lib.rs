//! Wire types shared between the authoring core, the API client and the apps
//!
//! Everything here mirrors a JSON shape exchanged with the backend. Values
//! are decoded into these structs at the boundary so that nothing inside the
//! workspace handles untyped responses.

pub mod authorization;
pub mod documents;
pub mod errors;
pub mod template;
pub mod values;

pub use authorization::{Authorization, AuthorizationStatus, CreateAuthorizationRequest};
pub use documents::{
    ConversionRequest, ConversionResult, DocumentFormat, DocumentKind, IssueSeverity,
    ProfileResolveRequest, ResolvedProfile, ValidationIssue, ValidationReport, ValidationRequest,
};
pub use errors::ErrorBody;
pub use template::{TemplateRecord, TemplateUpsert};
pub use values::VariableValues;
