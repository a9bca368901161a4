//! Core business logic for Freightdesk.
//!
//! This crate contains the shipment pricing pipeline. Pricing itself has ZERO
//! web or database dependencies; the only I/O lives behind the
//! [`routing::RouteResolver`] seam.
//!
//! # Modules
//!
//! - `routing` - Route resolution contracts and the Google Maps adapter
//! - `pricing` - Rate tables and the deterministic cost engine
//! - `quote` - Validation → resolution → pricing pipeline
//! - `shipment` - Shipment booking drafts and validation

pub mod pricing;
pub mod quote;
pub mod routing;
pub mod shipment;
