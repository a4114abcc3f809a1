//! Grant Calculator
//!
//! Housing-grant entitlement from monthly salary and flat type:
//!
//! - Singles Grant: 40,000 for 2/3/4-Room, 25,000 for 5-Room, otherwise 0
//! - Enhanced CPF Housing Grant: 60,000 when salary is at most 4,500, otherwise 0
//!
//! Inputs are assumed validated by the caller; unrecognized flat types earn
//! no singles grant rather than failing.

use crate::domain::{FlatType, GrantResult};

/// Singles Grant for 2-Room to 4-Room flats.
pub const SINGLES_GRANT_STANDARD: f64 = 40_000.0;

/// Singles Grant for 5-Room flats.
pub const SINGLES_GRANT_FIVE_ROOM: f64 = 25_000.0;

/// Enhanced CPF Housing Grant amount.
pub const ENHANCED_GRANT_AMOUNT: f64 = 60_000.0;

/// Highest monthly salary (inclusive) that still qualifies for the enhanced grant.
pub const ENHANCED_GRANT_SALARY_CEILING: f64 = 4_500.0;

/// Singles Grant component for a flat type.
pub fn singles_grant(flat_type: &FlatType) -> f64 {
    match flat_type {
        FlatType::TwoRoom | FlatType::ThreeRoom | FlatType::FourRoom => SINGLES_GRANT_STANDARD,
        FlatType::FiveRoom => SINGLES_GRANT_FIVE_ROOM,
        FlatType::OneRoom | FlatType::Executive | FlatType::Unrecognized(_) => 0.0,
    }
}

/// Enhanced grant component for a monthly salary.
pub fn enhanced_grant(salary: f64) -> f64 {
    if salary <= ENHANCED_GRANT_SALARY_CEILING {
        ENHANCED_GRANT_AMOUNT
    } else {
        0.0
    }
}

/// Calculate the total grant for a buyer.
pub fn calculate_grant(salary: f64, flat_type: &FlatType) -> GrantResult {
    let result = GrantResult::new(singles_grant(flat_type), enhanced_grant(salary));

    tracing::trace!(
        salary,
        flat_type = %flat_type,
        singles = result.singles_grant_amount,
        enhanced = result.enhanced_grant_amount,
        total = result.total_grant,
        "Calculated housing grant"
    );

    result
}
