//! Repository abstractions for data access.

pub mod shipment;

pub use shipment::{CreateShipmentInput, ShipmentRepository};
