//! Position model
//!
//! A single line item in a settlement: either income or an expense, given
//! as a flat total or as a unit price times a unit count.

use std::fmt;

use super::money::Money;
use crate::printer::markup::{cell, escape};

/// A single line item of a settlement
///
/// Positive values are income, negative values are expenses. When a unit
/// price is set, the effective value is unit price times unit count and the
/// stored flat value is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    name: String,
    unitcount: u32,
    unitprice: Money,
    value: Money,
}

impl Position {
    /// Create an empty position
    pub fn new() -> Self {
        Self {
            name: String::new(),
            unitcount: 1,
            unitprice: Money::zero(),
            value: Money::zero(),
        }
    }

    /// Create a position with all fields set
    ///
    /// The unit count is clamped to a minimum of 1 like in the setter.
    pub fn with_details(
        name: impl Into<String>,
        unitcount: i64,
        unitprice: Money,
        value: Money,
    ) -> Self {
        let mut position = Self::new();
        position.set_name(name);
        position.set_unitcount(unitcount);
        position.set_unitprice(unitprice);
        position.set_value(value);
        position
    }

    /// Set the name of the position
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the name of the position
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the unit count
    ///
    /// The count can never drop below 1; smaller inputs are corrected to 1
    /// and inputs beyond the storable range saturate. Returns whether the
    /// input was accepted unmodified.
    pub fn set_unitcount(&mut self, count: i64) -> bool {
        if count < 1 {
            self.unitcount = 1;
            return false;
        }
        match u32::try_from(count) {
            Ok(count) => {
                self.unitcount = count;
                true
            }
            Err(_) => {
                self.unitcount = u32::MAX;
                false
            }
        }
    }

    /// Get the unit count
    pub fn unitcount(&self) -> u32 {
        self.unitcount
    }

    /// Set the price per unit
    pub fn set_unitprice(&mut self, price: Money) {
        self.unitprice = price;
    }

    /// Get the price per unit
    pub fn unitprice(&self) -> Money {
        self.unitprice
    }

    /// Set the flat total of the position
    ///
    /// Income is positive, expenses are negative.
    pub fn set_value(&mut self, value: Money) {
        self.value = value;
    }

    /// Set the flat total of the position from an expense amount
    ///
    /// Expenses are positive here, income negative.
    pub fn set_minusvalue(&mut self, value: Money) {
        self.value = -value;
    }

    /// Get the total of the position
    ///
    /// When a unit price is present, the stored flat total is ignored.
    pub fn value(&self) -> Money {
        if !self.unitprice.is_zero() {
            self.unitprice * i64::from(self.unitcount)
        } else {
            self.value
        }
    }

    /// Get the income of the position; zero for expenses
    pub fn income(&self) -> Money {
        self.value().max(Money::zero())
    }

    /// Get the cost of the position; zero for income
    pub fn cost(&self) -> Money {
        (-self.value()).max(Money::zero())
    }

    /// Check whether the position carries no data at all
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.unitprice.is_zero() && self.value.is_zero()
    }

    /// Render the position as five HTML table cells
    ///
    /// Order: name, unit count, price per unit, income, cost. The unit count
    /// cell stays blank when no unit price is set. Each cell goes on its own
    /// line indented by `indent` tabs; a negative indent joins the cells
    /// without any separator and without leading indentation.
    pub fn htmlcells(&self, indent: i32) -> String {
        let tabs = "\t".repeat(indent.max(0) as usize);
        let joiner = if indent < 0 {
            String::new()
        } else {
            format!("\n{}", tabs)
        };

        let mut out = Vec::with_capacity(5);

        out.push(cell(&escape(&self.name)));

        if self.unitprice.is_zero() {
            out.push(cell(""));
        } else {
            out.push(cell(&self.unitcount.to_string()));
        }

        out.push(cell(&self.unitprice.abs().euro_signed()));
        out.push(cell(&self.income().euro_signed()));
        out.push(cell(&self.cost().euro_signed()));

        format!("{}{}", tabs, out.join(&joiner))
    }
}

impl Default for Position {
    /// An empty position; the unit count starts at its minimum of 1
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value().euro())
    }
}
