//! HDB resale records as returned by the data.gov.sg datastore API.
//!
//! Numeric columns arrive as strings (`"resale_price": "520000"`), sometimes
//! as bare numbers. Both are kept as the raw string so a malformed or absent
//! price can be classified gray instead of failing the whole batch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use flatfinder_core::{parse_amount, FlatType, InputError};

/// One resale transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleRecord {
    pub month: String,
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    #[serde(default)]
    pub storey_range: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub floor_area_sqm: Option<String>,
    #[serde(default)]
    pub flat_model: Option<String>,
    #[serde(default)]
    pub remaining_lease: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub resale_price: Option<String>,
}

impl ResaleRecord {
    /// Street address used for geocoding and display.
    pub fn address(&self) -> String {
        format!("{} {}", self.block, self.street_name)
    }

    pub fn flat_type(&self) -> FlatType {
        FlatType::parse(&self.flat_type)
    }

    /// Asking price as a non-negative amount.
    pub fn listing_price(&self) -> Result<f64, InputError> {
        match &self.resale_price {
            Some(raw) => parse_amount("resale_price", raw),
            None => Err(InputError::Empty {
                field: "resale_price",
            }),
        }
    }
}

/// Envelope of a `datastore_search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreResponse {
    pub result: DatastoreResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreResult {
    #[serde(default)]
    pub records: Vec<ResaleRecord>,
}

/// Decode listings file contents: either a raw API response or a bare record array.
///
/// The shape is picked from the top-level JSON value, so a bad row reports
/// its own field error.
pub fn decode_records(json: &str) -> Result<Vec<ResaleRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_array() {
        Vec::<ResaleRecord>::deserialize(value)
    } else {
        DatastoreResponse::deserialize(value).map(|response| response.result.records)
    }
}

fn value_to_text<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!("expected string or number, got {other}"))),
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => value_to_text(value).map(Some),
    }
}
