//! HTML document composition
//!
//! Turns a loaded document template plus an [`crate::models::Abrechnung`]
//! into one filled HTML document string.

pub mod html;
pub mod markup;

pub use html::{HtmlPrinter, PLACEHOLDER, SPLIT_MARKER};
