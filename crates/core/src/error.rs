//! Input errors for numeric boundary values.
//!
//! The classifier never lets these escape: any of them turns into a
//! `gray` verdict. They are public so front-ends that want to report *why*
//! a value was rejected can call [`crate::affordability::parse_amount`] directly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} is not finite: {value}")]
    NotFinite { field: &'static str, value: String },

    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: String },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Empty { field }
            | InputError::NotANumber { field, .. }
            | InputError::NotFinite { field, .. }
            | InputError::Negative { field, .. } => field,
        }
    }
}
