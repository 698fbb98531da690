//! Command implementations for `oscal-author`
//!
//! Everything that does not touch the network lives here so it can be
//! tested without a backend; `main.rs` only wires arguments, the client and
//! output.

pub mod commands;
pub mod values;

pub use commands::{authorization_request, builtin_listing, fill, preview, variables_report};
pub use values::{load_values, parse_values, ValuesFormat};
