//! Shipment validation errors.

use freightdesk_shared::AppError;
use thiserror::Error;

/// Shipment draft validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipmentError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Weight is not a positive number.
    #[error("weight must be a positive number, got {0:?}")]
    InvalidWeight(String),

    /// A date field could not be parsed.
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate {
        /// Offending field.
        field: &'static str,
        /// Value as supplied.
        value: String,
    },
}

impl From<ShipmentError> for AppError {
    fn from(err: ShipmentError) -> Self {
        Self::Validation(err.to_string())
    }
}
