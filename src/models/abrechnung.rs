//! Abrechnung model
//!
//! The settlement record for one volunteer and one project: exactly
//! [`POSITION_COUNT`] positions plus donations and payment details.

use std::fmt;

use chrono::NaiveDate;

use super::money::Money;
use super::position::Position;

/// Number of position slots on the settlement form; fixed by the document
/// layout and never resized.
pub const POSITION_COUNT: usize = 7;

/// Accepted IBAN length in digits (without the country prefix)
pub const IBAN_LENGTH: usize = 20;

/// Digits per block when rendering an IBAN with spaces
const IBAN_GROUP: usize = 4;

/// How the payment is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbanMode {
    /// Expenses are transferred to the volunteer's account
    Refund = 1,
    /// Income is debited from the volunteer's account
    Debit = 2,
    /// Income is transferred by the volunteer
    Transfer = 3,
}

impl IbanMode {
    /// Map a form code to a mode; unknown codes (including 0) are unset
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Refund),
            2 => Some(Self::Debit),
            3 => Some(Self::Transfer),
            _ => None,
        }
    }

    /// The numeric form code of this mode
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Whether a SEPA mandate form has to be requested
///
/// Code 1 ("mandate already granted") needs no request and therefore maps
/// to an unset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SepaMode {
    /// A mandate is not on file yet
    Missing = 2,
    /// The mandate on file is outdated
    Outdated = 3,
}

impl SepaMode {
    /// Map a form code to a mode; unknown codes (including 0 and 1) are unset
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::Missing),
            3 => Some(Self::Outdated),
            _ => None,
        }
    }

    /// The numeric form code of this mode
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// A volunteer settlement record
///
/// Owns exactly [`POSITION_COUNT`] positions. Setters follow a
/// defensive-default philosophy: invalid input is corrected or cleared
/// instead of raised, and each correcting setter reports acceptance through
/// its return value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abrechnung {
    positions: [Position; POSITION_COUNT],
    username: String,
    usergroup: String,
    projectname: String,
    projectdate: Option<NaiveDate>,
    donations: Money,
    accountname: String,
    iban: String,
    ibanmode: Option<IbanMode>,
    sepamode: Option<SepaMode>,
    ibanknown: bool,
}

impl Abrechnung {
    /// Create an empty settlement
    pub fn new() -> Self {
        Self::default()
    }

    /// All positions, in form order
    pub fn positions(&self) -> &[Position; POSITION_COUNT] {
        &self.positions
    }

    /// Mutable access to all positions
    pub fn positions_mut(&mut self) -> &mut [Position; POSITION_COUNT] {
        &mut self.positions
    }

    /// Set the volunteer's name
    pub fn set_username(&mut self, name: impl Into<String>) {
        self.username = name.into();
    }

    /// The volunteer's name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Set the volunteer's work area or team
    pub fn set_usergroup(&mut self, group: impl Into<String>) {
        self.usergroup = group.into();
    }

    /// The volunteer's work area or team
    pub fn usergroup(&self) -> &str {
        &self.usergroup
    }

    /// Set the name of the action or project
    pub fn set_projectname(&mut self, name: impl Into<String>) {
        self.projectname = name.into();
    }

    /// The name of the action or project
    pub fn projectname(&self) -> &str {
        &self.projectname
    }

    /// Set the project date directly
    pub fn set_projectdate(&mut self, date: NaiveDate) {
        self.projectdate = Some(date);
    }

    /// Set the project date from a `YYYY-MM-DD` string
    ///
    /// Any parse failure (wrong shape, non-numeric parts, out-of-range date)
    /// clears the date instead of raising. Returns whether a date was set.
    pub fn set_projectdate_str(&mut self, value: &str) -> bool {
        self.projectdate = parse_iso_date(value);
        self.projectdate.is_some()
    }

    /// Clear the project date
    pub fn clear_projectdate(&mut self) {
        self.projectdate = None;
    }

    /// The project date, if one was set
    pub fn projectdate(&self) -> Option<NaiveDate> {
        self.projectdate
    }

    /// Set the collected donations
    ///
    /// Negative input clamps to zero. Returns whether the input was accepted
    /// unmodified.
    pub fn set_donations(&mut self, amount: Money) -> bool {
        if amount.is_negative() {
            self.donations = Money::zero();
            false
        } else {
            self.donations = amount;
            true
        }
    }

    /// The collected donations
    pub fn donations(&self) -> Money {
        self.donations
    }

    /// Total income: all position incomes plus donations
    pub fn income(&self) -> Money {
        self.positions.iter().map(Position::income).sum::<Money>() + self.donations
    }

    /// Total cost: all position costs
    pub fn cost(&self) -> Money {
        self.positions.iter().map(Position::cost).sum()
    }

    /// Settlement total: the sum of all position values
    ///
    /// Donations are excluded here; they count toward `income` only.
    pub fn total(&self) -> Money {
        self.positions.iter().map(Position::value).sum()
    }

    /// Set the bank account holder's name
    pub fn set_accountname(&mut self, name: impl Into<String>) {
        self.accountname = name.into();
    }

    /// The bank account holder's name
    pub fn accountname(&self) -> &str {
        &self.accountname
    }

    /// Set the IBAN (without the country prefix)
    ///
    /// Embedded spaces are stripped. The result is accepted only if it is
    /// exactly [`IBAN_LENGTH`] ASCII digits; anything else stores an empty
    /// IBAN. Returns whether the IBAN was accepted.
    pub fn set_iban(&mut self, value: &str) -> bool {
        let stripped: String = value.chars().filter(|c| *c != ' ').collect();
        if stripped.len() == IBAN_LENGTH && stripped.chars().all(|c| c.is_ascii_digit()) {
            self.iban = stripped;
            true
        } else {
            self.iban.clear();
            false
        }
    }

    /// The stored IBAN digits
    ///
    /// With `spaces` the digits come grouped in blocks of four for display;
    /// the grouping is purely cosmetic and never changes the digit string.
    pub fn iban(&self, spaces: bool) -> String {
        if !spaces {
            return self.iban.clone();
        }
        let mut out = String::with_capacity(self.iban.len() + self.iban.len() / IBAN_GROUP);
        for (i, ch) in self.iban.chars().enumerate() {
            if i > 0 && i % IBAN_GROUP == 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Set how the payment is handled
    pub fn set_ibanmode(&mut self, mode: Option<IbanMode>) {
        self.ibanmode = mode;
    }

    /// Set the payment mode from a form code
    ///
    /// Unknown codes clear the mode. Returns whether a mode was set.
    pub fn set_ibanmode_code(&mut self, code: i64) -> bool {
        self.ibanmode = IbanMode::from_code(code);
        self.ibanmode.is_some()
    }

    /// How the payment is handled, if specified
    pub fn ibanmode(&self) -> Option<IbanMode> {
        self.ibanmode
    }

    /// Set whether a SEPA mandate form is requested
    pub fn set_sepamode(&mut self, mode: Option<SepaMode>) {
        self.sepamode = mode;
    }

    /// Set the SEPA mode from a form code
    ///
    /// Unknown codes clear the mode. Returns whether a mode was set.
    pub fn set_sepamode_code(&mut self, code: i64) -> bool {
        self.sepamode = SepaMode::from_code(code);
        self.sepamode.is_some()
    }

    /// Whether a SEPA mandate form is requested, if specified
    pub fn sepamode(&self) -> Option<SepaMode> {
        self.sepamode
    }

    /// Set whether the IBAN is already on file with the association
    pub fn set_ibanknown(&mut self, known: bool) {
        self.ibanknown = known;
    }

    /// Whether the IBAN is already on file with the association
    pub fn ibanknown(&self) -> bool {
        self.ibanknown
    }

    /// Check whether the settlement carries any data
    ///
    /// True if any position is non-empty or donations were entered.
    pub fn has_data(&self) -> bool {
        self.positions.iter().any(|p| !p.is_empty()) || self.donations.is_positive()
    }
}

impl fmt::Display for Abrechnung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.total().euro())
    }
}

/// Parse a `YYYY-MM-DD` string into a date; `None` on any failure
///
/// Extra trailing `-` segments are ignored, matching the lenient form input
/// handling of the rest of the model.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() < 3 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_settlement_is_empty() {
        let abrechnung = Abrechnung::new();
        assert!(!abrechnung.has_data());
        assert_eq!(abrechnung.positions().len(), POSITION_COUNT);
        assert_eq!(abrechnung.total(), Money::zero());
    }

    #[test]
    fn test_single_position_marks_data() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.positions_mut()[3].set_name("Flyer");
        assert!(abrechnung.has_data());
    }

    #[test]
    fn test_donations_mark_data_and_clamp() {
        let mut abrechnung = Abrechnung::new();
        assert!(!abrechnung.set_donations(Money::from_cents(-100)));
        assert_eq!(abrechnung.donations(), Money::zero());
        assert!(!abrechnung.has_data());

        assert!(abrechnung.set_donations(Money::from_cents(100)));
        assert!(abrechnung.has_data());
    }

    #[test]
    fn test_totals() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.positions_mut()[0].set_value(Money::from_cents(2000));
        abrechnung.positions_mut()[1].set_value(Money::from_cents(-500));
        abrechnung.set_donations(Money::from_cents(300));

        assert_eq!(abrechnung.income(), Money::from_cents(2300));
        assert_eq!(abrechnung.cost(), Money::from_cents(500));
        assert_eq!(abrechnung.total(), Money::from_cents(1500));
    }

    #[test]
    fn test_total_excludes_donations() {
        // Donations count toward income only. With donations set,
        // income - cost deliberately differs from total.
        let mut abrechnung = Abrechnung::new();
        abrechnung.positions_mut()[0].set_value(Money::from_cents(1000));
        abrechnung.set_donations(Money::from_cents(250));

        assert_eq!(abrechnung.total(), Money::from_cents(1000));
        assert_eq!(
            abrechnung.income() - abrechnung.cost(),
            abrechnung.total() + abrechnung.donations()
        );
    }

    #[test]
    fn test_iban_round_trip() {
        let mut abrechnung = Abrechnung::new();
        assert!(abrechnung.set_iban("12345678901234567890"));
        assert_eq!(abrechnung.iban(false), "12345678901234567890");
        assert_eq!(abrechnung.iban(true), "1234 5678 9012 3456 7890");

        // Embedded spaces are fine as long as the digits check out
        assert!(abrechnung.set_iban("1234 5678 9012 3456 7890"));
        assert_eq!(abrechnung.iban(false), "12345678901234567890");
    }

    #[test]
    fn test_iban_rejection() {
        let mut abrechnung = Abrechnung::new();

        assert!(!abrechnung.set_iban("123456789012345678"));
        assert_eq!(abrechnung.iban(true), "");

        assert!(!abrechnung.set_iban("1234567890123456789X"));
        assert_eq!(abrechnung.iban(false), "");

        // A rejected IBAN clears a previously accepted one
        assert!(abrechnung.set_iban("12345678901234567890"));
        assert!(!abrechnung.set_iban("DE345678901234567890"));
        assert_eq!(abrechnung.iban(false), "");
    }

    #[test]
    fn test_date_parsing() {
        let mut abrechnung = Abrechnung::new();

        assert!(abrechnung.set_projectdate_str("2024-05-01"));
        assert_eq!(
            abrechnung.projectdate(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );

        assert!(!abrechnung.set_projectdate_str("not-a-date"));
        assert_eq!(abrechnung.projectdate(), None);

        assert!(abrechnung.set_projectdate_str("2024-05-01"));
        assert!(!abrechnung.set_projectdate_str("2024-13-99"));
        assert_eq!(abrechnung.projectdate(), None);

        abrechnung.set_projectdate(NaiveDate::from_ymd_opt(2023, 12, 24).unwrap());
        assert!(abrechnung.projectdate().is_some());
        abrechnung.clear_projectdate();
        assert_eq!(abrechnung.projectdate(), None);
    }

    #[test]
    fn test_iban_mode_codes() {
        let mut abrechnung = Abrechnung::new();

        assert!(abrechnung.set_ibanmode_code(1));
        assert_eq!(abrechnung.ibanmode(), Some(IbanMode::Refund));

        assert!(!abrechnung.set_ibanmode_code(0));
        assert_eq!(abrechnung.ibanmode(), None);

        assert!(abrechnung.set_ibanmode_code(3));
        assert!(!abrechnung.set_ibanmode_code(4));
        assert_eq!(abrechnung.ibanmode(), None);
    }

    #[test]
    fn test_sepa_mode_codes() {
        let mut abrechnung = Abrechnung::new();

        // 1 means "mandate already granted" and needs no request
        assert!(!abrechnung.set_sepamode_code(1));
        assert_eq!(abrechnung.sepamode(), None);

        assert!(abrechnung.set_sepamode_code(2));
        assert_eq!(abrechnung.sepamode(), Some(SepaMode::Missing));

        assert!(abrechnung.set_sepamode_code(3));
        assert_eq!(abrechnung.sepamode(), Some(SepaMode::Outdated));
    }

    #[test]
    fn test_display_is_total() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.positions_mut()[0].set_value(Money::from_cents(-4321));
        assert_eq!(abrechnung.to_string(), "-43,21 €");
    }
}
