//! Financial eligibility and listing-match engine for HDB resale buyers.
//!
//! Three pure calculators, safe to call from any number of threads:
//!
//! - [`grant::calculate_grant`]: housing grants from salary and flat type
//! - [`affordability::classify_listing`]: green/yellow/red/gray verdict for a listing price
//! - [`loan_rate::resolve_loan_rate`]: effective-rate description for a loan product
//!
//! [`financial`] adds instalment and interest-exposure figures on top of the
//! loan rate schedules.

pub mod affordability;
pub mod domain;
pub mod error;
pub mod financial;
pub mod grant;
pub mod loan_rate;

pub use affordability::{
    adjusted_ceiling, classify_amounts, classify_for_profile, classify_listing, parse_amount,
    TOLERANCE_FACTOR,
};
pub use domain::{BuyerProfile, FlatType, GrantResult, LoanType, MatchClassification};
pub use error::InputError;
pub use financial::{
    resolve_interest_exposure, tenure_months, InterestExposure, MAX_TENURE_YEARS,
};
pub use grant::calculate_grant;
pub use loan_rate::{rate_schedule, resolve_loan_rate, RateSchedule, RateSegment};
