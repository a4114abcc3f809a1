//! Affordability Classifier
//!
//! Classifies a listing price against the buyer's adjusted ceiling:
//!
//! `adjusted_ceiling = preferred_price - total_grant - cpf_balance`
//!
//! - `listing <= ceiling` → green
//! - `ceiling < listing <= ceiling × 1.05` → yellow
//! - otherwise → red
//!
//! Any amount that is not a non-negative real number short-circuits to gray
//! before anything else is computed.
//!
//! Amounts are compared in whole cents, so a listing priced exactly at the
//! ceiling in dollars and cents is green regardless of binary float
//! rounding. Sub-cent digits are rounded half away from zero.
//!
//! The ceiling is not clamped. When grants plus CPF exceed the preferred
//! price it goes negative, green and yellow become unreachable and every
//! positive listing classifies red.

use crate::domain::{BuyerProfile, FlatType, MatchClassification};
use crate::error::InputError;
use crate::grant::calculate_grant;

/// Overshoot allowed above the adjusted ceiling for a yellow verdict.
pub const TOLERANCE_FACTOR: f64 = 1.05;

// TOLERANCE_FACTOR as an exact ratio, for cent arithmetic.
const TOLERANCE_NUMERATOR: i128 = 21;
const TOLERANCE_DENOMINATOR: i128 = 20;

/// Parse a boundary amount as a non-negative real number.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }

    let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        field,
        value: raw.to_string(),
    })?;

    check_amount(field, value)
}

fn check_amount(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field,
            value: value.to_string(),
        });
    }
    if value < 0.0 {
        return Err(InputError::Negative {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Whole cents, saturating at the `i128` range.
fn to_cents(amount: f64) -> i128 {
    (amount * 100.0).round() as i128
}

fn ceiling_cents(preferred_price: f64, total_grant: f64, cpf_balance: f64) -> i128 {
    to_cents(preferred_price)
        .saturating_sub(to_cents(total_grant))
        .saturating_sub(to_cents(cpf_balance))
}

/// Out-of-pocket budget ceiling after grants and CPF are netted off.
pub fn adjusted_ceiling(preferred_price: f64, total_grant: f64, cpf_balance: f64) -> f64 {
    ceiling_cents(preferred_price, total_grant, cpf_balance) as f64 / 100.0
}

/// Apply the tolerance band to an already computed ceiling.
pub fn classify_against_ceiling(listing_price: f64, ceiling: f64) -> MatchClassification {
    classify_cents(to_cents(listing_price), to_cents(ceiling))
}

fn classify_cents(listing: i128, ceiling: i128) -> MatchClassification {
    if listing <= ceiling {
        MatchClassification::Green
    } else if listing.saturating_mul(TOLERANCE_DENOMINATOR)
        <= ceiling.saturating_mul(TOLERANCE_NUMERATOR)
    {
        MatchClassification::Yellow
    } else {
        MatchClassification::Red
    }
}

/// Classify a listing from raw string inputs.
///
/// This is the boundary form used when values come straight from a form or
/// a dataset row.
pub fn classify_listing(
    preferred_price: &str,
    listing_price: &str,
    salary: &str,
    flat_type: &FlatType,
    cpf_balance: &str,
) -> MatchClassification {
    let parsed = (|| {
        Ok::<_, InputError>((
            parse_amount("preferred_price", preferred_price)?,
            parse_amount("listing_price", listing_price)?,
            parse_amount("salary", salary)?,
            parse_amount("cpf_balance", cpf_balance)?,
        ))
    })();

    match parsed {
        Ok((preferred, listing, salary, cpf)) => {
            classify_valid(preferred, listing, salary, flat_type, cpf)
        }
        Err(e) => {
            tracing::debug!(field = e.field(), error = %e, "Listing not classifiable");
            MatchClassification::Gray
        }
    }
}

/// Classify a listing from numeric inputs.
///
/// Negative or non-finite amounts yield gray, same as unparseable strings.
pub fn classify_amounts(
    preferred_price: f64,
    listing_price: f64,
    salary: f64,
    flat_type: &FlatType,
    cpf_balance: f64,
) -> MatchClassification {
    let checked = (|| {
        Ok::<_, InputError>((
            check_amount("preferred_price", preferred_price)?,
            check_amount("listing_price", listing_price)?,
            check_amount("salary", salary)?,
            check_amount("cpf_balance", cpf_balance)?,
        ))
    })();

    match checked {
        Ok((preferred, listing, salary, cpf)) => {
            classify_valid(preferred, listing, salary, flat_type, cpf)
        }
        Err(e) => {
            tracing::debug!(field = e.field(), error = %e, "Listing not classifiable");
            MatchClassification::Gray
        }
    }
}

/// Classify a listing price for a stored buyer profile.
pub fn classify_for_profile(profile: &BuyerProfile, listing_price: f64) -> MatchClassification {
    classify_amounts(
        profile.preferred_price,
        listing_price,
        profile.salary,
        &profile.flat_type,
        profile.cpf_balance,
    )
}

fn classify_valid(
    preferred_price: f64,
    listing_price: f64,
    salary: f64,
    flat_type: &FlatType,
    cpf_balance: f64,
) -> MatchClassification {
    let grant = calculate_grant(salary, flat_type);
    let ceiling = ceiling_cents(preferred_price, grant.total_grant, cpf_balance);
    classify_cents(to_cents(listing_price), ceiling)
}
