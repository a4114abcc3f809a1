//! Loan Rate Resolver
//!
//! Maps a loan product and tenure to the effective-rate description shown
//! next to a listing. Unknown products resolve to a sentinel string instead
//! of failing.

use serde::{Deserialize, Serialize};

use crate::domain::LoanType;

/// HDB concessionary rate (annual percentage).
pub const HDB_RATE_PERCENT: f64 = 2.6;

/// DBS fixed-period rate (annual percentage).
pub const DBS_FIXED_RATE_PERCENT: f64 = 2.5;

/// DBS rate after the fixed period (annual percentage).
pub const DBS_FLOATING_RATE_PERCENT: f64 = 4.48;

/// Length of the DBS fixed period in years.
pub const DBS_FIXED_YEARS: u32 = 5;

/// Description returned for products we do not know.
pub const UNKNOWN_LOAN_TYPE: &str = "Unknown Loan Type";

/// One rate period of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSegment {
    pub annual_rate_percent: f64,
    /// `None` means the rate runs until the end of the loan.
    pub years: Option<u32>,
}

/// Ordered rate periods for a loan product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    pub segments: Vec<RateSegment>,
}

impl RateSchedule {
    /// Rate in force during the given loan year (0-based).
    pub fn rate_for_year(&self, year: u32) -> Option<f64> {
        let mut start = 0u32;
        for segment in &self.segments {
            match segment.years {
                Some(len) if year >= start + len => start += len,
                _ => return Some(segment.annual_rate_percent),
            }
        }
        None
    }
}

/// Rate periods for a product, or `None` for an unrecognized one.
pub fn rate_schedule(loan_type: &LoanType) -> Option<RateSchedule> {
    match loan_type {
        LoanType::HdbHousingLoan => Some(RateSchedule {
            segments: vec![RateSegment {
                annual_rate_percent: HDB_RATE_PERCENT,
                years: None,
            }],
        }),
        LoanType::Dbs5YearFixed => Some(RateSchedule {
            segments: vec![
                RateSegment {
                    annual_rate_percent: DBS_FIXED_RATE_PERCENT,
                    years: Some(DBS_FIXED_YEARS),
                },
                RateSegment {
                    annual_rate_percent: DBS_FLOATING_RATE_PERCENT,
                    years: None,
                },
            ],
        }),
        LoanType::Unrecognized(_) => None,
    }
}

/// Describe the effective annual rate for a loan product and tenure.
///
/// A tenure that is not greater than the fixed period (including NaN) only
/// shows the fixed-period rate.
pub fn resolve_loan_rate(loan_type: &LoanType, tenure_years: f64) -> String {
    match loan_type {
        LoanType::HdbHousingLoan => format!("{HDB_RATE_PERCENT}% per annum"),
        LoanType::Dbs5YearFixed => {
            let fixed = format!(
                "{DBS_FIXED_RATE_PERCENT}% per annum for the first {DBS_FIXED_YEARS} years"
            );
            if tenure_years > f64::from(DBS_FIXED_YEARS) {
                format!("{fixed}, then {DBS_FLOATING_RATE_PERCENT}% per annum")
            } else {
                fixed
            }
        }
        LoanType::Unrecognized(raw) => {
            tracing::debug!(loan_type = %raw, "Unrecognized loan type");
            UNKNOWN_LOAN_TYPE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdb_rate_ignores_tenure() {
        for tenure in [1.0, 5.0, 25.0] {
            assert_eq!(
                resolve_loan_rate(&LoanType::HdbHousingLoan, tenure),
                "2.6% per annum"
            );
        }
    }

    #[test]
    fn test_dbs_rate_short_tenure() {
        assert_eq!(
            resolve_loan_rate(&LoanType::Dbs5YearFixed, 5.0),
            "2.5% per annum for the first 5 years"
        );
        assert_eq!(
            resolve_loan_rate(&LoanType::Dbs5YearFixed, 3.0),
            "2.5% per annum for the first 5 years"
        );
    }

    #[test]
    fn test_dbs_rate_long_tenure() {
        assert_eq!(
            resolve_loan_rate(&LoanType::Dbs5YearFixed, 10.0),
            "2.5% per annum for the first 5 years, then 4.48% per annum"
        );
        assert_eq!(
            resolve_loan_rate(&LoanType::Dbs5YearFixed, 5.5),
            "2.5% per annum for the first 5 years, then 4.48% per annum"
        );
    }

    #[test]
    fn test_unknown_loan_type() {
        assert_eq!(
            resolve_loan_rate(&LoanType::parse("Unrecognized"), 5.0),
            "Unknown Loan Type"
        );
        assert_eq!(resolve_loan_rate(&LoanType::parse(""), -3.0), UNKNOWN_LOAN_TYPE);
    }

    #[test]
    fn test_never_fails_on_odd_tenure() {
        for tenure in [f64::NAN, f64::INFINITY, -1.0, 0.0] {
            let description = resolve_loan_rate(&LoanType::Dbs5YearFixed, tenure);
            assert!(description.starts_with("2.5% per annum"));
        }
    }

    #[test]
    fn test_schedule_rate_for_year() {
        let dbs = rate_schedule(&LoanType::Dbs5YearFixed).unwrap();
        assert_eq!(dbs.rate_for_year(0), Some(2.5));
        assert_eq!(dbs.rate_for_year(4), Some(2.5));
        assert_eq!(dbs.rate_for_year(5), Some(4.48));
        assert_eq!(dbs.rate_for_year(24), Some(4.48));

        let hdb = rate_schedule(&LoanType::HdbHousingLoan).unwrap();
        assert_eq!(hdb.rate_for_year(20), Some(2.6));

        assert!(rate_schedule(&LoanType::parse("Other")).is_none());
    }
}
