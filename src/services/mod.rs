//! Business logic layer
//!
//! Connects the routing surface (CLI or HTTP) to the data models: form
//! query evaluation and filename derivation.

pub mod form;

pub use form::{evaluate_query, suggest_filename};
