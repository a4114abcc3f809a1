//! Financial Calculation Utilities
//!
//! Amortization maths for housing loans, including loans whose rate changes
//! part-way through the tenure. This is the single source of truth for
//! instalment and interest figures.

use serde::{Deserialize, Serialize};

use crate::domain::LoanType;
use crate::loan_rate::{rate_schedule, RateSchedule};

/// Longest HDB-eligible loan tenure.
pub const MAX_TENURE_YEARS: f64 = 35.0;

/// Calculate the monthly instalment using the standard amortization formula.
///
/// EMI = P × r × (1 + r)^n / [(1 + r)^n - 1]
///
/// Where:
/// - P = Principal loan amount
/// - r = Monthly interest rate (annual_rate / 12 / 100)
/// - n = Number of months (tenure)
///
/// # Returns
/// Monthly instalment, or 0.0 if principal or tenure is not positive
pub fn calculate_emi(principal: f64, annual_rate_percent: f64, tenure_months: i64) -> f64 {
    if tenure_months <= 0 || principal <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;

    if monthly_rate <= 0.0 {
        return principal / tenure_months as f64;
    }

    let factor = compound(monthly_rate, tenure_months);
    if !factor.is_finite() {
        // interest-only in the limit
        return principal * monthly_rate;
    }

    principal * monthly_rate * factor / (factor - 1.0)
}

/// Total interest paid over the tenure at a single rate.
pub fn calculate_total_interest(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: i64,
) -> f64 {
    let emi = calculate_emi(principal, annual_rate_percent, tenure_months);
    (emi * tenure_months as f64) - principal
}

/// Total amount repaid (principal + interest) at a single rate.
pub fn calculate_total_repayment(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: i64,
) -> f64 {
    calculate_emi(principal, annual_rate_percent, tenure_months) * tenure_months as f64
}

/// Balance still owed after paying `months` instalments of `emi`.
pub fn outstanding_balance(principal: f64, annual_rate_percent: f64, emi: f64, months: i64) -> f64 {
    if months <= 0 {
        return principal;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate <= 0.0 {
        return (principal - emi * months as f64).max(0.0);
    }

    let growth = compound(monthly_rate, months);
    if !growth.is_finite() {
        let interest = principal * monthly_rate;
        return if emi > interest {
            0.0
        } else if emi == interest {
            principal
        } else {
            f64::INFINITY
        };
    }

    (principal * growth - emi * (growth - 1.0) / monthly_rate).max(0.0)
}

/// (1 + r)^n over `months` periods.
fn compound(monthly_rate: f64, months: i64) -> f64 {
    match i32::try_from(months) {
        // powi keeps integer month counts precise
        Ok(n) => (1.0 + monthly_rate).powi(n),
        Err(_) => (1.0 + monthly_rate).powf(months as f64),
    }
}

/// Whole months in a tenure, or `None` unless it lies in `(0, MAX_TENURE_YEARS]`.
pub fn tenure_months(tenure_years: f64) -> Option<i64> {
    if tenure_years > 0.0 && tenure_years <= MAX_TENURE_YEARS {
        Some((tenure_years * 12.0).round() as i64)
    } else {
        None
    }
}

/// Instalment paid during one rate period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstalmentPeriod {
    pub months: i64,
    pub annual_rate_percent: f64,
    pub monthly_instalment: f64,
}

/// Interest a buyer is exposed to over the life of a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestExposure {
    pub principal: f64,
    pub tenure_months: i64,
    pub periods: Vec<InstalmentPeriod>,
    pub total_interest: f64,
    pub total_repayment: f64,
}

/// Amortize a loan across a rate schedule.
///
/// At each rate change the instalment is re-priced so the outstanding
/// balance is cleared over the months left. A tenure outside
/// `(0, MAX_TENURE_YEARS]` yields zero exposure.
pub fn estimate_interest_exposure(
    principal: f64,
    schedule: &RateSchedule,
    tenure_years: f64,
) -> InterestExposure {
    let tenure_months = tenure_months(tenure_years).unwrap_or(0);

    let mut periods = Vec::new();
    let mut balance = principal.max(0.0);
    let mut remaining = tenure_months;
    let mut total_paid = 0.0;

    for segment in &schedule.segments {
        if remaining <= 0 || balance <= 0.0 {
            break;
        }

        let months = match segment.years {
            Some(years) => (i64::from(years) * 12).min(remaining),
            None => remaining,
        };
        let emi = calculate_emi(balance, segment.annual_rate_percent, remaining);

        periods.push(InstalmentPeriod {
            months,
            annual_rate_percent: segment.annual_rate_percent,
            monthly_instalment: emi,
        });

        total_paid += emi * months as f64;
        balance = outstanding_balance(balance, segment.annual_rate_percent, emi, months);
        remaining -= months;
    }

    let principal = principal.max(0.0);
    let total_repayment = if periods.is_empty() { 0.0 } else { total_paid };
    let total_interest = if periods.is_empty() {
        0.0
    } else {
        total_repayment - principal
    };

    InterestExposure {
        principal,
        tenure_months,
        periods,
        total_interest,
        total_repayment,
    }
}

/// Interest exposure for a loan product, or `None` for an unrecognized one.
pub fn resolve_interest_exposure(
    loan_type: &LoanType,
    principal: f64,
    tenure_years: f64,
) -> Option<InterestExposure> {
    let schedule = rate_schedule(loan_type)?;
    Some(estimate_interest_exposure(principal, &schedule, tenure_years))
}
