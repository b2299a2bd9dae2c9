//! abrechnungsformular - volunteer settlement forms as HTML documents
//!
//! This library provides the core functionality for filling the volunteer
//! ("Aktive") expense/income settlement form of a nonprofit: a fixed-layout
//! document with exactly seven position slots, composed as HTML and rendered
//! to PDF by an external collaborator.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, positions, the settlement record)
//! - `printer`: Template sectioning and HTML document composition
//! - `services`: Business logic (form query evaluation, filename derivation)
//!
//! # Example
//!
//! ```rust
//! use abrechnungsformular::models::{Abrechnung, Money};
//! use abrechnungsformular::printer::HtmlPrinter;
//!
//! let mut abrechnung = Abrechnung::new();
//! abrechnung.set_username("Erika Musterfrau");
//! abrechnung.positions_mut()[0].set_name("Plakate");
//! abrechnung.positions_mut()[0].set_value(Money::from_cents(-2500));
//!
//! let printer = HtmlPrinter::from_template("<!--POSITIONS-->\n");
//! let html = printer.compose(Some(&abrechnung));
//! assert!(html.contains("Plakate"));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod printer;
pub mod services;

pub use error::{AbrechnungError, AbrechnungResult};
