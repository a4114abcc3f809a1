//! External collaborators the screener talks to.
//!
//! The resale dataset and the buyer preference store live outside this
//! workspace; these traits are the request/response contracts for them.
//! The in-memory implementations back tests and the CLI.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use flatfinder_core::BuyerProfile;

use crate::error::ScreeningError;
use crate::query::ListingQuery;
use crate::resale::{decode_records, ResaleRecord};

/// Supplies resale listings for a town and month.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<ResaleRecord>, ScreeningError>;
}

/// Supplies buyer profiles by user identity.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn profile(&self, user_id: &str) -> Result<Option<BuyerProfile>, ScreeningError>;
}

/// Listing source over a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct StaticListingSource {
    records: Vec<ResaleRecord>,
}

impl StaticListingSource {
    pub fn new(records: Vec<ResaleRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON file holding either a datastore response or a record array.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ScreeningError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let records = decode_records(&content)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            count = records.len(),
            "Loaded resale records"
        );

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(record: &ResaleRecord, query: &ListingQuery) -> bool {
        if !record.town.trim().eq_ignore_ascii_case(query.town.trim()) {
            return false;
        }
        if record.month != query.month.to_string() {
            return false;
        }
        match &query.flat_type {
            Some(flat_type) => record.flat_type() == *flat_type,
            None => true,
        }
    }
}

#[async_trait]
impl ListingSource for StaticListingSource {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<ResaleRecord>, ScreeningError> {
        Ok(self
            .records
            .iter()
            .filter(|record| Self::matches(record, query))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

/// Preference store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    profiles: HashMap<String, BuyerProfile>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: impl Into<String>, profile: BuyerProfile) {
        self.profiles.insert(user_id.into(), profile);
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn profile(&self, user_id: &str) -> Result<Option<BuyerProfile>, ScreeningError> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::YearMonth;
    use flatfinder_core::{FlatType, LoanType};

    fn record(town: &str, month: &str, flat_type: &str, price: &str) -> ResaleRecord {
        ResaleRecord {
            month: month.to_string(),
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            block: "1".to_string(),
            street_name: "TEST ST".to_string(),
            storey_range: None,
            floor_area_sqm: None,
            flat_model: None,
            remaining_lease: None,
            resale_price: Some(price.to_string()),
        }
    }

    fn query(town: &str, flat_type: Option<FlatType>, limit: usize) -> ListingQuery {
        ListingQuery {
            town: town.to_string(),
            month: YearMonth::new(2024, 10).unwrap(),
            flat_type,
            limit,
        }
    }

    #[tokio::test]
    async fn test_static_source_filters() {
        let source = StaticListingSource::new(vec![
            record("BEDOK", "2024-10", "4 ROOM", "500000"),
            record("BEDOK", "2024-10", "3 ROOM", "400000"),
            record("BEDOK", "2024-09", "4 ROOM", "480000"),
            record("TAMPINES", "2024-10", "4 ROOM", "550000"),
        ]);

        let all = source.fetch(&query("bedok", None, 10)).await.unwrap();
        assert_eq!(all.len(), 2);

        let four = source
            .fetch(&query("BEDOK", Some(FlatType::FourRoom), 10))
            .await
            .unwrap();
        assert_eq!(four.len(), 1);
        assert_eq!(four[0].resale_price.as_deref(), Some("500000"));

        let limited = source.fetch(&query("BEDOK", None, 1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let mut store = InMemoryPreferenceStore::new();
        store.insert(
            "user-1",
            BuyerProfile {
                salary: 4000.0,
                flat_type: FlatType::FourRoom,
                cpf_balance: 20_000.0,
                preferred_price: 500_000.0,
                loan_type: LoanType::HdbHousingLoan,
            },
        );

        assert!(store.profile("user-1").await.unwrap().is_some());
        assert!(store.profile("user-2").await.unwrap().is_none());
    }
}
