//! Resale listing screening for flatfinder
//!
//! Connects the pure engine in `flatfinder-core` to its external
//! collaborators: a source of resale listings and a store of buyer
//! profiles. Each fetched listing is annotated with a marker colour and a
//! loan-rate description.

pub mod error;
pub mod format;
pub mod query;
pub mod resale;
pub mod screening;
pub mod source;

pub use error::ScreeningError;
pub use format::format_sgd;
pub use query::{ListingQuery, YearMonth};
pub use resale::{decode_records, DatastoreResponse, ResaleRecord};
pub use screening::{ClassificationCounts, ListingScreener, ScreenedListing, ScreeningReport};
pub use source::{InMemoryPreferenceStore, ListingSource, PreferenceStore, StaticListingSource};
