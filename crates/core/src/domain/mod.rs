//! Domain Value Types
//!
//! Buyer profile, grant breakdown, loan product and listing verdict types
//! shared by every calculator in this crate.

mod types;

pub use types::*;
