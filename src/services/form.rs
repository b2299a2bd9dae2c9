//! Form evaluation service
//!
//! Populates an [`Abrechnung`] from the flat key-value map a submitted form
//! yields, and derives a download filename for the finished document.
//!
//! Query keys: `username`, `usergroup`, `projectname`, `projectdate`,
//! `p{1..7}name`, `p{1..7}count`, `p{1..7}price`, `p{1..7}value`,
//! `donations`, `accountname`, `iban`, `ibanmode`, `sepamode`, `ibanknown`.

use std::collections::HashMap;

use crate::error::{AbrechnungError, AbrechnungResult};
use crate::models::{Abrechnung, Money, POSITION_COUNT};

/// Populate a settlement from form fields
///
/// Missing and blank fields are skipped. Numeric fields that are present but
/// unparseable are an error (the routing layer answers those with a generic
/// bad request); every other malformed value degrades to the setters'
/// documented defaults.
pub fn evaluate_query(
    abrechnung: &mut Abrechnung,
    query: &HashMap<String, String>,
) -> AbrechnungResult<()> {
    if let Some(value) = field(query, "username") {
        abrechnung.set_username(value);
    }
    if let Some(value) = field(query, "usergroup") {
        abrechnung.set_usergroup(value);
    }
    if let Some(value) = field(query, "projectname") {
        abrechnung.set_projectname(value);
    }
    if let Some(value) = field(query, "projectdate") {
        abrechnung.set_projectdate_str(value);
    }

    for index in 0..POSITION_COUNT {
        let slot = index + 1;

        if let Some(value) = field(query, &format!("p{}name", slot)) {
            abrechnung.positions_mut()[index].set_name(value);
        }
        if let Some(value) = field(query, &format!("p{}count", slot)) {
            let count = parse_int(&format!("p{}count", slot), value)?;
            abrechnung.positions_mut()[index].set_unitcount(count);
        }
        if let Some(value) = field(query, &format!("p{}price", slot)) {
            let price = parse_money(&format!("p{}price", slot), value)?;
            abrechnung.positions_mut()[index].set_unitprice(price);
        }
        if let Some(value) = field(query, &format!("p{}value", slot)) {
            let total = parse_money(&format!("p{}value", slot), value)?;
            abrechnung.positions_mut()[index].set_value(total);
        }
    }

    if let Some(value) = field(query, "donations") {
        abrechnung.set_donations(parse_money("donations", value)?);
    }
    if let Some(value) = field(query, "accountname") {
        abrechnung.set_accountname(value);
    }
    if let Some(value) = field(query, "iban") {
        abrechnung.set_iban(value);
    }
    if let Some(value) = field(query, "ibanmode") {
        abrechnung.set_ibanmode_code(parse_int("ibanmode", value)?);
    }
    if let Some(value) = field(query, "sepamode") {
        abrechnung.set_sepamode_code(parse_int("sepamode", value)?);
    }
    if let Some(value) = field(query, "ibanknown") {
        abrechnung.set_ibanknown(is_truthy(value));
    }

    Ok(())
}

/// Suggest a filename stem for the finished document
///
/// Deterministic for a given settlement: `Abrechnung`, the ISO project date
/// when set, and the sanitized project name (volunteer name as fallback),
/// joined by underscores.
pub fn suggest_filename(abrechnung: &Abrechnung) -> String {
    let mut parts = vec!["Abrechnung".to_string()];

    if let Some(date) = abrechnung.projectdate() {
        parts.push(date.to_string());
    }

    let label = if abrechnung.projectname().is_empty() {
        abrechnung.username()
    } else {
        abrechnung.projectname()
    };
    let label = sanitize(label);
    if !label.is_empty() {
        parts.push(label);
    }

    parts.join("_")
}

/// Look up a field, treating blank values like absent ones
fn field<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn parse_int(name: &str, value: &str) -> AbrechnungResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AbrechnungError::bad_field(name, value))
}

fn parse_money(name: &str, value: &str) -> AbrechnungResult<Money> {
    Money::parse(value).map_err(|_| AbrechnungError::bad_field(name, value))
}

/// Checkbox semantics for boolean form fields
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Replace every run of non-alphanumeric characters with one underscore
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(ch);
        } else {
            gap = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IbanMode, SepaMode};
    use chrono::NaiveDate;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_evaluate_full_query() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[
            ("username", "Erika Musterfrau"),
            ("usergroup", "Radtouren"),
            ("projectname", "Sternfahrt"),
            ("projectdate", "2024-05-01"),
            ("p1name", "Plakate"),
            ("p1count", "4"),
            ("p1price", "-2,50"),
            ("p2name", "Startgelder"),
            ("p2value", "120.00"),
            ("donations", "15,00"),
            ("accountname", "Erika Musterfrau"),
            ("iban", "1234 5678 9012 3456 7890"),
            ("ibanmode", "1"),
            ("sepamode", "2"),
            ("ibanknown", "on"),
        ]);

        evaluate_query(&mut abrechnung, &query).unwrap();

        assert_eq!(abrechnung.username(), "Erika Musterfrau");
        assert_eq!(abrechnung.usergroup(), "Radtouren");
        assert_eq!(abrechnung.projectname(), "Sternfahrt");
        assert_eq!(
            abrechnung.projectdate(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(abrechnung.positions()[0].value(), Money::from_cents(-1000));
        assert_eq!(abrechnung.positions()[1].value(), Money::from_cents(12000));
        assert_eq!(abrechnung.donations(), Money::from_cents(1500));
        assert_eq!(abrechnung.iban(false), "12345678901234567890");
        assert_eq!(abrechnung.ibanmode(), Some(IbanMode::Refund));
        assert_eq!(abrechnung.sepamode(), Some(SepaMode::Missing));
        assert!(abrechnung.ibanknown());
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[("p1value", ""), ("donations", "  "), ("username", "")]);

        evaluate_query(&mut abrechnung, &query).unwrap();
        assert!(!abrechnung.has_data());
    }

    #[test]
    fn test_unparseable_amount_is_a_query_error() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[("donations", "dreifuffzich")]);

        let err = evaluate_query(&mut abrechnung, &query).unwrap_err();
        assert!(err.is_query());
    }

    #[test]
    fn test_unparseable_mode_is_a_query_error() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[("ibanmode", "first")]);

        assert!(evaluate_query(&mut abrechnung, &query).is_err());
    }

    #[test]
    fn test_unknown_mode_code_degrades_silently() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[("ibanmode", "0"), ("sepamode", "1")]);

        evaluate_query(&mut abrechnung, &query).unwrap();
        assert_eq!(abrechnung.ibanmode(), None);
        assert_eq!(abrechnung.sepamode(), None);
    }

    #[test]
    fn test_malformed_date_and_iban_degrade_silently() {
        let mut abrechnung = Abrechnung::new();
        let query = query(&[("projectdate", "gestern"), ("iban", "DE1234")]);

        evaluate_query(&mut abrechnung, &query).unwrap();
        assert_eq!(abrechnung.projectdate(), None);
        assert_eq!(abrechnung.iban(false), "");
    }

    #[test]
    fn test_suggest_filename_full() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.set_username("Erika Musterfrau");
        abrechnung.set_projectname("Sternfahrt Hamburg!");
        abrechnung.set_projectdate_str("2024-05-01");

        assert_eq!(
            suggest_filename(&abrechnung),
            "Abrechnung_2024-05-01_Sternfahrt_Hamburg"
        );
    }

    #[test]
    fn test_suggest_filename_falls_back_to_username() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.set_username("Max Mustermann");

        assert_eq!(suggest_filename(&abrechnung), "Abrechnung_Max_Mustermann");
    }

    #[test]
    fn test_suggest_filename_empty_settlement() {
        assert_eq!(suggest_filename(&Abrechnung::new()), "Abrechnung");
    }

    #[test]
    fn test_suggest_filename_is_deterministic() {
        let mut abrechnung = Abrechnung::new();
        abrechnung.set_projectname("Tour de Natur");
        assert_eq!(suggest_filename(&abrechnung), suggest_filename(&abrechnung));
    }
}
