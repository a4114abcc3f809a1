//! Centralized defaults for flatfinder
//!
//! Single source of truth for the default values behind [`crate::Settings`].
//! Business rules (grant amounts, loan rates, tolerance band) live with the
//! calculators in `flatfinder-core`; only operational knobs live here.

/// Environment variable conventions
pub mod env {
    /// Prefix for overrides, e.g. `FLATFINDER__LOGGING__LEVEL=debug`
    pub const PREFIX: &str = "FLATFINDER";

    /// Separator between prefix and nested keys
    pub const SEPARATOR: &str = "__";
}

/// Logging defaults
pub mod logging {
    /// Default filter directive when RUST_LOG is unset
    pub const DEFAULT_LEVEL: &str = "info";
}

/// Resale listing screening defaults
pub mod screening {
    /// data.gov.sg resource id of the HDB resale flat prices dataset
    pub const RESALE_DATASET_ID: &str = "d_8b84c4ee58e3cfc0ece0d773c8ca6abc";

    /// Rows requested per listing query
    pub const PAGE_LIMIT: usize = 200;

    /// Retry the previous month when the current month has no listings
    pub const FALLBACK_TO_PREVIOUS_MONTH: bool = true;

    /// Tenure used when annotating listings with a loan rate
    pub const DEFAULT_TENURE_YEARS: f64 = 25.0;

    /// Upper bound accepted for the default tenure
    pub const MAX_TENURE_YEARS: f64 = flatfinder_core::MAX_TENURE_YEARS;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenure_within_bounds() {
        assert!(screening::DEFAULT_TENURE_YEARS > 0.0);
        assert!(screening::DEFAULT_TENURE_YEARS <= screening::MAX_TENURE_YEARS);
    }

    #[test]
    fn test_page_limit_positive() {
        assert!(screening::PAGE_LIMIT > 0);
    }
}
