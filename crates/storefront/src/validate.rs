//! Framework-free validation primitives.
//!
//! Validation is expressed as plain predicate functions over structured
//! input records, returning a discriminated [`Validation`] result rather
//! than mutating any form state. Rule-specific validators live next to the
//! types they check (see [`crate::checkout::validate`]).

use rust_decimal::Decimal;
use serde::Serialize;

/// A single named rule violation, suitable for user-facing display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field the rule applies to (e.g., `"zip"`).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Create a violation for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of validating an input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Every rule passed.
    Valid,
    /// One or more rules failed.
    Invalid(Vec<Violation>),
}

impl Validation {
    /// Build a result from collected violations (empty means valid).
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(violations)
        }
    }

    /// Whether every rule passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The violation list (empty when valid).
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        match self {
            Self::Valid => Vec::new(),
            Self::Invalid(violations) => violations,
        }
    }
}

/// Largest price either bound of the filter form accepts.
pub const MAX_FILTER_PRICE: i64 = 9999;

/// Validate the products-page price range form.
///
/// A single bound is an open-ended range and is fine on its own; each
/// present bound must fall in `0..=9999`, and when both are present the
/// minimum must not exceed the maximum. The filter engine itself treats an
/// inverted range as matching nothing - this validator exists so the
/// boundary can surface the problem to the user instead.
#[must_use]
pub fn validate_price_bounds(min: Option<Decimal>, max: Option<Decimal>) -> Validation {
    let mut violations = Vec::new();
    let limit = Decimal::from(MAX_FILTER_PRICE);

    for (field, bound) in [("min", min), ("max", max)] {
        if let Some(value) = bound {
            if value < Decimal::ZERO {
                violations.push(Violation::new(field, format!("{field} must be at least 0")));
            } else if value > limit {
                violations.push(Violation::new(
                    field,
                    format!("{field} cannot exceed {MAX_FILTER_PRICE}"),
                ));
            }
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            violations.push(Violation::new(
                "min",
                "minimum price cannot be greater than maximum price",
            ));
        }
    }

    Validation::from_violations(violations)
}
