//! Field validation for checkout forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::validate::{Validation, Violation};

use super::{AddressInput, PaymentInput};

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("hard-coded pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("hard-coded pattern"));
static CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{13,19}$").expect("hard-coded pattern"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("hard-coded pattern"));

/// Validate a new shipping address.
#[must_use]
pub fn validate_address(input: &AddressInput) -> Validation {
    let mut violations = Vec::new();

    if input.full_name.trim().len() < 2 {
        violations.push(Violation::new("full_name", "enter the recipient's name"));
    }
    if input.line1.trim().len() < 5 {
        violations.push(Violation::new("line1", "enter a street address"));
    }
    if input.city.trim().len() < 2 {
        violations.push(Violation::new("city", "enter a city"));
    }
    if input.state.trim().is_empty() {
        violations.push(Violation::new("state", "enter a state or province"));
    }
    if !ZIP_RE.is_match(input.zip.trim()) {
        violations.push(Violation::new("zip", "enter a valid ZIP code"));
    }
    if input.country.trim().is_empty() {
        violations.push(Violation::new("country", "enter a country"));
    }
    if !PHONE_RE.is_match(input.phone.trim().replace([' ', '-'], "").as_str()) {
        violations.push(Violation::new("phone", "enter a valid phone number"));
    }

    Validation::from_violations(violations)
}

/// Validate a new payment method.
#[must_use]
pub fn validate_payment(input: &PaymentInput) -> Validation {
    validate_payment_with_year(input, current_year())
}

fn current_year() -> u16 {
    use chrono::Datelike;
    u16::try_from(chrono::Utc::now().year()).unwrap_or(u16::MAX)
}

// Split out so expiry checks stay testable without a clock.
fn validate_payment_with_year(input: &PaymentInput, current_year: u16) -> Validation {
    let mut violations = Vec::new();

    let digits: String = input
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !CARD_RE.is_match(&digits) {
        violations.push(Violation::new("card_number", "enter a valid card number"));
    }
    if input.cardholder.trim().len() < 2 {
        violations.push(Violation::new("cardholder", "enter the cardholder name"));
    }
    if !(1..=12).contains(&input.expiry_month) {
        violations.push(Violation::new("expiry_month", "enter a valid month"));
    }
    if input.expiry_year < current_year {
        violations.push(Violation::new("expiry_year", "card has expired"));
    }
    if !CVV_RE.is_match(input.cvv.trim()) {
        violations.push(Violation::new("cvv", "enter a valid security code"));
    }

    Validation::from_violations(violations)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address() -> AddressInput {
        AddressInput {
            full_name: String::from("Jane Doe"),
            line1: String::from("123 Main Street"),
            line2: None,
            city: String::from("Springfield"),
            state: String::from("IL"),
            zip: String::from("62704"),
            country: String::from("United States"),
            phone: String::from("+1 555-867-5309"),
        }
    }

    fn payment() -> PaymentInput {
        PaymentInput {
            kind: crate::checkout::PaymentKind::Credit,
            card_number: String::from("4111 1111 1111 1111"),
            cardholder: String::from("Jane Doe"),
            expiry_month: 12,
            expiry_year: 2030,
            cvv: String::from("123"),
        }
    }

    #[test]
    fn test_valid_address_passes() {
        assert!(validate_address(&address()).is_valid());
    }

    #[test]
    fn test_zip_accepts_plus_four() {
        let mut input = address();
        input.zip = String::from("62704-1234");
        assert!(validate_address(&input).is_valid());

        input.zip = String::from("627");
        let violations = validate_address(&input).into_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().unwrap().field, "zip");
    }

    #[test]
    fn test_blank_address_reports_every_field() {
        let input = AddressInput {
            full_name: String::new(),
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: String::new(),
            phone: String::new(),
        };
        let violations = validate_address(&input).into_violations();
        assert_eq!(violations.len(), 7);
    }

    #[test]
    fn test_valid_payment_passes() {
        assert!(validate_payment_with_year(&payment(), 2026).is_valid());
    }

    #[test]
    fn test_card_number_ignores_spacing() {
        let mut input = payment();
        input.card_number = String::from("4111-1111-1111-1111");
        assert!(validate_payment_with_year(&input, 2026).is_valid());

        input.card_number = String::from("4111");
        let violations = validate_payment_with_year(&input, 2026).into_violations();
        assert_eq!(violations.first().unwrap().field, "card_number");
    }

    #[test]
    fn test_expired_card_rejected() {
        let mut input = payment();
        input.expiry_year = 2024;
        let violations = validate_payment_with_year(&input, 2026).into_violations();
        assert_eq!(violations.first().unwrap().field, "expiry_year");
    }

    #[test]
    fn test_month_and_cvv_ranges() {
        let mut input = payment();
        input.expiry_month = 13;
        input.cvv = String::from("12");
        let violations = validate_payment_with_year(&input, 2026).into_violations();
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["expiry_month", "cvv"]);
    }
}
