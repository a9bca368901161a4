//! Shipment pricing: rate tables and the cost engine.

pub mod engine;
pub mod rates;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{CostEngine, round_currency};
pub use rates::{AddOnCharge, RateTable, VehicleRate};
pub use types::{
    AddOn, CostBreakdown, CostComponents, CostResult, MAX_WEIGHT_KG, ShipmentCostRequest,
    VehicleType,
};
