//! Shipment booking drafts and their validation.
//!
//! Drafts arrive as loosely-typed JSON; validation turns them into
//! [`ValidatedShipment`] / [`ValidatedPatch`] values that the persistence
//! layer stores as-is.

mod error;
mod types;
mod validation;

pub use error::ShipmentError;
pub use types::{QuoteDraft, ShipmentDraft, ShipmentPatch, ValidatedPatch, ValidatedShipment};
pub use validation::parse_date;
