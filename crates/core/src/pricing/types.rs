//! Pricing inputs and outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::routing::{Distance, Location, RouteGeometry, TravelTime};

/// Vehicle class requested for a shipment.
///
/// Unknown classes are carried through as `Other` and priced with the
/// default rates rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    /// Full-size truck.
    Truck,
    /// Light commercial truck.
    MiniTruck,
    /// Three/four-wheel tempo.
    Tempo,
    /// Pickup van.
    Pickup,
    /// Articulated tractor-trailer.
    TractorTrailer,
    /// Any identifier outside the rate table.
    Other(String),
}

impl VehicleType {
    /// Parses a vehicle identifier. Matching is exact.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "truck" => Self::Truck,
            "mini_truck" => Self::MiniTruck,
            "tempo" => Self::Tempo,
            "pickup" => Self::Pickup,
            "tractor_trailer" => Self::TractorTrailer,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Truck => "truck",
            Self::MiniTruck => "mini_truck",
            Self::Tempo => "tempo",
            Self::Pickup => "pickup",
            Self::TractorTrailer => "tractor_trailer",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for VehicleType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<VehicleType> for String {
    fn from(vehicle: VehicleType) -> Self {
        vehicle.code().to_string()
    }
}

/// Optional shipment service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AddOn {
    /// Priority dispatch.
    ExpressDelivery,
    /// Careful handling of breakables.
    FragileHandling,
    /// Refrigerated transport, charged per kilometer.
    TemperatureControlled,
    /// Cargo insurance.
    Insurance,
    /// Saturday/Sunday delivery.
    WeekendDelivery,
    /// Delivery outside business hours.
    NightDelivery,
    /// Labour at both ends.
    LoadingUnloading,
    /// Protective packaging.
    Packaging,
    /// Unrecognised identifier, as supplied.
    Other(String),
}

impl AddOn {
    /// Parses an add-on identifier, ignoring case.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "express_delivery" => Self::ExpressDelivery,
            "fragile_handling" => Self::FragileHandling,
            "temperature_controlled" => Self::TemperatureControlled,
            "insurance" => Self::Insurance,
            "weekend_delivery" => Self::WeekendDelivery,
            "night_delivery" => Self::NightDelivery,
            "loading_unloading" => Self::LoadingUnloading,
            "packaging" => Self::Packaging,
            _ => Self::Other(code.to_string()),
        }
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::ExpressDelivery => "express_delivery",
            Self::FragileHandling => "fragile_handling",
            Self::TemperatureControlled => "temperature_controlled",
            Self::Insurance => "insurance",
            Self::WeekendDelivery => "weekend_delivery",
            Self::NightDelivery => "night_delivery",
            Self::LoadingUnloading => "loading_unloading",
            Self::Packaging => "packaging",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for AddOn {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<AddOn> for String {
    fn from(add_on: AddOn) -> Self {
        add_on.code().to_string()
    }
}

/// Heaviest accepted cargo, in kilograms.
///
/// Keeps every priced amount well inside `i64`.
pub const MAX_WEIGHT_KG: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Everything needed to price one shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentCostRequest {
    /// Pickup point.
    pub pickup: Location,
    /// Drop point.
    pub drop: Location,
    /// Requested vehicle class.
    pub vehicle_type: VehicleType,
    /// Cargo weight in kilograms, in `(0, MAX_WEIGHT_KG]`.
    pub weight_kg: Decimal,
    /// Commodity label, informational only.
    pub commodity: Option<String>,
    /// Add-ons in request order; duplicates are charged per entry.
    pub add_ons: Vec<AddOn>,
}

/// Unrounded cost components, in base currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostComponents {
    /// Distance × per-km rate.
    pub distance_cost: f64,
    /// Tons × per-ton rate.
    pub weight_cost: f64,
    /// Flat vehicle charge.
    pub vehicle_type_cost: f64,
    /// Sum of add-on charges.
    pub add_ons_cost: f64,
}

#[allow(clippy::float_arithmetic)]
impl CostComponents {
    /// Distance + weight + vehicle, before add-ons, summed in that order.
    #[must_use]
    pub fn base_cost(&self) -> f64 {
        self.distance_cost + self.weight_cost + self.vehicle_type_cost
    }

    /// Base cost plus add-ons.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.base_cost() + self.add_ons_cost
    }
}

/// Rounded per-component costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Distance component.
    pub distance_cost: i64,
    /// Weight component.
    pub weight_cost: i64,
    /// Vehicle component.
    pub vehicle_type_cost: i64,
    /// Add-on component.
    pub add_ons_cost: i64,
}

/// Complete price quote for a shipment.
///
/// Every amount is rounded on its own from unrounded values, so `total_cost`
/// can differ by one unit from the sum of the breakdown fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    /// Driving distance echoed from the route.
    pub distance: Distance,
    /// Driving time echoed from the route.
    pub duration: TravelTime,
    /// Rounded base cost.
    pub base_cost: i64,
    /// Rounded add-on cost.
    pub add_on_costs: i64,
    /// Rounded total cost.
    pub total_cost: i64,
    /// Rounded components.
    pub breakdown: CostBreakdown,
    /// Route geometry, when resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteGeometry>,
}
