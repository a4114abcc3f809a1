//! Listing Screener
//!
//! Pulls resale listings for a town, then annotates each one with an
//! affordability verdict and the buyer's loan-rate description. Listings
//! are classified independently: a bad price turns that listing gray and
//! leaves the rest untouched.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flatfinder_config::ScreeningSettings;
use flatfinder_core::{
    adjusted_ceiling, calculate_grant, classify_for_profile, resolve_loan_rate, BuyerProfile,
    GrantResult, MatchClassification,
};

use crate::error::ScreeningError;
use crate::query::{ListingQuery, YearMonth};
use crate::resale::ResaleRecord;
use crate::source::{ListingSource, PreferenceStore};

/// A listing with its verdict attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedListing {
    #[serde(flatten)]
    pub record: ResaleRecord,
    pub address: String,
    /// Marker colour: green, yellow, red or gray.
    #[serde(rename = "color")]
    pub classification: MatchClassification,
    pub loan_rate: String,
}

/// Tally of verdicts in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub gray: usize,
}

impl ClassificationCounts {
    pub fn record(&mut self, classification: MatchClassification) {
        match classification {
            MatchClassification::Green => self.green += 1,
            MatchClassification::Yellow => self.yellow += 1,
            MatchClassification::Red => self.red += 1,
            MatchClassification::Gray => self.gray += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red + self.gray
    }
}

/// Result of screening one town for one buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub town: String,
    /// Month the listings came from, after any fallback.
    pub month: YearMonth,
    pub grant: GrantResult,
    pub adjusted_ceiling: f64,
    pub listings: Vec<ScreenedListing>,
    pub counts: ClassificationCounts,
}

/// Screens resale listings against buyer profiles.
pub struct ListingScreener {
    source: Arc<dyn ListingSource>,
    settings: ScreeningSettings,
}

impl ListingScreener {
    pub fn new(source: Arc<dyn ListingSource>, settings: ScreeningSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &ScreeningSettings {
        &self.settings
    }

    /// Screen the month containing `today`, falling back to the previous
    /// month when it has no listings and fallback is enabled.
    pub async fn screen(
        &self,
        profile: &BuyerProfile,
        town: &str,
        today: NaiveDate,
    ) -> Result<ScreeningReport, ScreeningError> {
        self.screen_month(profile, town, YearMonth::from_date(today)).await
    }

    /// Screen a specific month, with the same fallback rule.
    pub async fn screen_month(
        &self,
        profile: &BuyerProfile,
        town: &str,
        month: YearMonth,
    ) -> Result<ScreeningReport, ScreeningError> {
        let mut month = month;
        let mut records = self.fetch(profile, town, month).await?;

        if records.is_empty() && self.settings.fallback_to_previous_month {
            let previous = month.previous();
            tracing::debug!(
                town,
                month = %month,
                previous = %previous,
                "No listings this month, trying previous month"
            );
            month = previous;
            records = self.fetch(profile, town, month).await?;
        }

        let report = self.annotate(profile, town, month, records);

        tracing::info!(
            town,
            month = %report.month,
            total = report.counts.total(),
            green = report.counts.green,
            yellow = report.counts.yellow,
            red = report.counts.red,
            gray = report.counts.gray,
            "Screened listings"
        );

        Ok(report)
    }

    /// Look up the buyer's profile, then screen.
    pub async fn screen_for_user(
        &self,
        store: &dyn PreferenceStore,
        user_id: &str,
        town: &str,
        today: NaiveDate,
    ) -> Result<ScreeningReport, ScreeningError> {
        let profile = store
            .profile(user_id)
            .await?
            .ok_or_else(|| ScreeningError::ProfileNotFound(user_id.to_string()))?;

        self.screen(&profile, town, today).await
    }

    async fn fetch(
        &self,
        profile: &BuyerProfile,
        town: &str,
        month: YearMonth,
    ) -> Result<Vec<ResaleRecord>, ScreeningError> {
        let query = ListingQuery {
            town: town.to_string(),
            month,
            flat_type: profile
                .flat_type
                .is_recognized()
                .then(|| profile.flat_type.clone()),
            limit: self.settings.page_limit,
        };

        self.source.fetch(&query).await
    }

    fn annotate(
        &self,
        profile: &BuyerProfile,
        town: &str,
        month: YearMonth,
        records: Vec<ResaleRecord>,
    ) -> ScreeningReport {
        let grant = calculate_grant(profile.salary, &profile.flat_type);
        let ceiling = adjusted_ceiling(profile.preferred_price, grant.total_grant, profile.cpf_balance);

        let mut counts = ClassificationCounts::default();
        let listings = records
            .into_iter()
            .map(|record| {
                let classification = match record.listing_price() {
                    Ok(price) => classify_for_profile(profile, price),
                    Err(e) => {
                        tracing::debug!(address = %record.address(), error = %e, "Unpriced listing");
                        MatchClassification::Gray
                    }
                };
                counts.record(classification);

                ScreenedListing {
                    address: record.address(),
                    classification,
                    loan_rate: resolve_loan_rate(
                        &profile.loan_type,
                        self.settings.default_tenure_years,
                    ),
                    record,
                }
            })
            .collect();

        ScreeningReport {
            town: town.to_string(),
            month,
            grant,
            adjusted_ceiling: ceiling,
            listings,
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticListingSource;
    use flatfinder_core::{FlatType, LoanType};

    fn record(month: &str, flat_type: &str, price: &str) -> ResaleRecord {
        ResaleRecord {
            month: month.to_string(),
            town: "ANG MO KIO".to_string(),
            flat_type: flat_type.to_string(),
            block: "406".to_string(),
            street_name: "ANG MO KIO AVE 10".to_string(),
            storey_range: None,
            floor_area_sqm: None,
            flat_model: None,
            remaining_lease: None,
            resale_price: Some(price.to_string()),
        }
    }

    fn profile() -> BuyerProfile {
        // grant 100k, ceiling 380k, band top 399k
        BuyerProfile {
            salary: 4000.0,
            flat_type: FlatType::FourRoom,
            cpf_balance: 20_000.0,
            preferred_price: 500_000.0,
            loan_type: LoanType::Dbs5YearFixed,
        }
    }

    fn screener(records: Vec<ResaleRecord>, fallback: bool) -> ListingScreener {
        let settings = ScreeningSettings {
            fallback_to_previous_month: fallback,
            ..ScreeningSettings::default()
        };
        ListingScreener::new(Arc::new(StaticListingSource::new(records)), settings)
    }

    fn october() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    #[tokio::test]
    async fn test_annotates_each_listing() {
        let screener = screener(
            vec![
                record("2024-10", "4 ROOM", "370000"),
                record("2024-10", "4 ROOM", "395000"),
                record("2024-10", "4 ROOM", "460000"),
                record("2024-10", "4 ROOM", "abc"),
                record("2024-10", "3 ROOM", "300000"),
            ],
            true,
        );

        let report = screener.screen(&profile(), "ANG MO KIO", october()).await.unwrap();

        assert_eq!(report.month.to_string(), "2024-10");
        assert_eq!(report.grant.total_grant, 100_000.0);
        assert_eq!(report.adjusted_ceiling, 380_000.0);

        let colours: Vec<_> = report.listings.iter().map(|l| l.classification).collect();
        assert_eq!(
            colours,
            vec![
                MatchClassification::Green,
                MatchClassification::Yellow,
                MatchClassification::Red,
                MatchClassification::Gray,
            ]
        );
        assert_eq!(
            report.counts,
            ClassificationCounts {
                green: 1,
                yellow: 1,
                red: 1,
                gray: 1
            }
        );
        assert_eq!(
            report.listings[0].loan_rate,
            "2.5% per annum for the first 5 years, then 4.48% per annum"
        );
        assert_eq!(report.listings[0].address, "406 ANG MO KIO AVE 10");
    }

    #[tokio::test]
    async fn test_falls_back_to_previous_month() {
        let screener = screener(vec![record("2024-09", "4 ROOM", "370000")], true);
        let report = screener.screen(&profile(), "ANG MO KIO", october()).await.unwrap();

        assert_eq!(report.month.to_string(), "2024-09");
        assert_eq!(report.listings.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_disabled() {
        let screener = screener(vec![record("2024-09", "4 ROOM", "370000")], false);
        let report = screener.screen(&profile(), "ANG MO KIO", october()).await.unwrap();

        assert_eq!(report.month.to_string(), "2024-10");
        assert!(report.listings.is_empty());
        assert_eq!(report.counts.total(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_flat_type_is_not_filtered() {
        let mut buyer = profile();
        buyer.flat_type = FlatType::parse("Jumbo");

        let screener = screener(
            vec![
                record("2024-10", "4 ROOM", "100000"),
                record("2024-10", "EXECUTIVE", "100000"),
            ],
            true,
        );
        let report = screener.screen(&buyer, "ANG MO KIO", october()).await.unwrap();

        assert_eq!(report.listings.len(), 2);
        assert_eq!(report.grant.singles_grant_amount, 0.0);
    }

    #[tokio::test]
    async fn test_absent_price_is_gray() {
        let mut unpriced = record("2024-10", "4 ROOM", "0");
        unpriced.resale_price = None;

        let screener = screener(vec![record("2024-10", "4 ROOM", "370000"), unpriced], true);
        let report = screener.screen(&profile(), "ANG MO KIO", october()).await.unwrap();

        assert_eq!(report.listings[0].classification, MatchClassification::Green);
        assert_eq!(report.listings[1].classification, MatchClassification::Gray);

        let json = serde_json::to_value(&report.listings[1]).unwrap();
        assert!(json["resale_price"].is_null());
    }

    #[tokio::test]
    async fn test_serialized_listing_uses_color_key() {
        let screener = screener(vec![record("2024-10", "4 ROOM", "370000")], true);
        let report = screener.screen(&profile(), "ANG MO KIO", october()).await.unwrap();

        let json = serde_json::to_value(&report.listings[0]).unwrap();
        assert_eq!(json["color"], "green");
        assert_eq!(json["resale_price"], "370000");
        assert_eq!(json["address"], "406 ANG MO KIO AVE 10");
    }
}
