//! Buyer and Listing Value Types
//!
//! Everything here is a plain value: built per query, never mutated, and
//! dropped once the answer is produced. Categorical fields that arrive as
//! free-form strings (flat type, loan product) are parsed into closed enums
//! with an explicit `Unrecognized` variant so unmapped values stay visible.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HDB flat type.
///
/// Parsing never fails: both the app spelling (`"4-Room"`) and the resale
/// dataset spelling (`"4 ROOM"`) are accepted, anything else is kept verbatim
/// in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlatType {
    OneRoom,
    TwoRoom,
    ThreeRoom,
    FourRoom,
    FiveRoom,
    Executive,
    Unrecognized(String),
}

impl FlatType {
    /// Parse a flat type from user or dataset input.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().replace(['-', '_'], " ").to_ascii_uppercase();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        match normalized.as_str() {
            "1 ROOM" => FlatType::OneRoom,
            "2 ROOM" => FlatType::TwoRoom,
            "3 ROOM" => FlatType::ThreeRoom,
            "4 ROOM" => FlatType::FourRoom,
            "5 ROOM" => FlatType::FiveRoom,
            "EXECUTIVE" => FlatType::Executive,
            _ => FlatType::Unrecognized(raw.to_string()),
        }
    }

    /// Label used by the app (`"4-Room"`, `"Executive"`).
    pub fn label(&self) -> &str {
        match self {
            FlatType::OneRoom => "1-Room",
            FlatType::TwoRoom => "2-Room",
            FlatType::ThreeRoom => "3-Room",
            FlatType::FourRoom => "4-Room",
            FlatType::FiveRoom => "5-Room",
            FlatType::Executive => "Executive",
            FlatType::Unrecognized(raw) => raw,
        }
    }

    /// Label used by the resale dataset (`"4 ROOM"`, `"EXECUTIVE"`).
    pub fn dataset_label(&self) -> String {
        self.label().replace('-', " ").to_uppercase()
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FlatType::Unrecognized(_))
    }
}

impl From<String> for FlatType {
    fn from(value: String) -> Self {
        FlatType::parse(&value)
    }
}

impl From<&str> for FlatType {
    fn from(value: &str) -> Self {
        FlatType::parse(value)
    }
}

impl From<FlatType> for String {
    fn from(value: FlatType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for FlatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Housing loan product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanType {
    /// Concessionary loan from HDB.
    HdbHousingLoan,
    /// Bank package fixed for the first five years.
    Dbs5YearFixed,
    Unrecognized(String),
}

impl LoanType {
    pub const HDB_HOUSING_LOAN: &'static str = "HDB Housing Loan";
    pub const DBS_5_YEAR_FIXED: &'static str = "DBS 5 Year Fixed Package";

    /// Parse a product name. Only the exact product names are recognized.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::HDB_HOUSING_LOAN => LoanType::HdbHousingLoan,
            Self::DBS_5_YEAR_FIXED => LoanType::Dbs5YearFixed,
            other => LoanType::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LoanType::HdbHousingLoan => Self::HDB_HOUSING_LOAN,
            LoanType::Dbs5YearFixed => Self::DBS_5_YEAR_FIXED,
            LoanType::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for LoanType {
    fn from(value: String) -> Self {
        LoanType::parse(&value)
    }
}

impl From<&str> for LoanType {
    fn from(value: &str) -> Self {
        LoanType::parse(value)
    }
}

impl From<LoanType> for String {
    fn from(value: LoanType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A buyer's stated finances and preferences.
///
/// Amounts are Singapore dollars; `salary` is monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub salary: f64,
    pub flat_type: FlatType,
    pub cpf_balance: f64,
    pub preferred_price: f64,
    pub loan_type: LoanType,
}

/// Housing grants a buyer is entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrantResult {
    pub singles_grant_amount: f64,
    pub enhanced_grant_amount: f64,
    /// Always `singles_grant_amount + enhanced_grant_amount`.
    pub total_grant: f64,
}

impl GrantResult {
    pub fn new(singles_grant_amount: f64, enhanced_grant_amount: f64) -> Self {
        Self {
            singles_grant_amount,
            enhanced_grant_amount,
            total_grant: singles_grant_amount + enhanced_grant_amount,
        }
    }
}

/// Affordability verdict for one listing, used directly as a marker colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClassification {
    /// Listing fits within the adjusted budget.
    Green,
    /// Listing overshoots the adjusted budget by at most 5%.
    Yellow,
    /// Listing exceeds the tolerance band.
    Red,
    /// Inputs could not be evaluated. Never an affordability verdict.
    Gray,
}

impl MatchClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchClassification::Green => "green",
            MatchClassification::Yellow => "yellow",
            MatchClassification::Red => "red",
            MatchClassification::Gray => "gray",
        }
    }

    /// `true` for green, yellow and red.
    pub fn is_verdict(self) -> bool {
        self != MatchClassification::Gray
    }
}

impl fmt::Display for MatchClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
