//! Multi-step authoring wizards
//!
//! This crate provides the state behind the two guided flows of the
//! authoring UI:
//! - `AuthorizationWizard`: pick a template, fill its variables, attach the
//!   SSP/SAR references and produce an authorization request snapshot
//! - `ComponentBuilderWizard`: describe components and the controls they
//!   implement, producing an OSCAL component definition
//!
//! Wizards are plain owned state; callers drive them from a single event
//! loop.

pub mod authorization;
pub mod component;
pub mod errors;
pub mod step;

pub use authorization::{AuthorizationStep, AuthorizationWizard};
pub use component::{
    ComponentBuilderWizard, ComponentDraft, ComponentStep, ComponentType, ControlImplementation,
};
pub use errors::{Result, WizardError};
pub use step::Step;
