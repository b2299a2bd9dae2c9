//! Core data models for abrechnungsformular
//!
//! This module contains the data structures of the settlement domain:
//! Euro amounts, line-item positions, and the settlement record itself.

pub mod abrechnung;
pub mod money;
pub mod position;

pub use abrechnung::{Abrechnung, IbanMode, SepaMode, IBAN_LENGTH, POSITION_COUNT};
pub use money::{Money, MoneyParseError};
pub use position::Position;
