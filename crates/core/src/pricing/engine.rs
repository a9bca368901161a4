//! Deterministic shipment cost engine.
//!
//! Amounts are computed in binary64 in a fixed order so that quotes agree to
//! the unit with the published tariff calculator, which prices in doubles.
//! Rates and weights stay [`Decimal`] at the boundary.

use rust_decimal::Decimal;

use super::rates::{AddOnCharge, RateTable};
use super::types::{CostBreakdown, CostComponents, CostResult, ShipmentCostRequest};
use crate::routing::RouteInfo;

const METERS_PER_KM: f64 = 1000.0;
const KG_PER_TON: f64 = 1000.0;

/// Prices shipments from a resolved route and a rate table.
///
/// No I/O and no interior state: identical inputs always produce identical
/// results.
#[derive(Debug, Clone, Default)]
pub struct CostEngine {
    rates: RateTable,
}

impl CostEngine {
    /// Creates an engine over the given rate table.
    #[must_use]
    pub const fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// Creates an engine using [`RateTable::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(RateTable::standard())
    }

    /// Returns the rate table in use.
    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Computes the unrounded cost components.
    ///
    /// 1. `distance_km = meters / 1000`, `weight_tons = kg / 1000`
    /// 2. distance cost = `distance_km × per-km rate`
    /// 3. weight cost = `weight_tons × per-ton rate`
    /// 4. vehicle cost = flat vehicle charge
    /// 5. add-ons = running sum over every entry in request order,
    ///    duplicates included
    #[must_use]
    #[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
    pub fn components(&self, request: &ShipmentCostRequest, route: &RouteInfo) -> CostComponents {
        let distance_km = route.distance.value as f64 / METERS_PER_KM;
        let weight_tons = to_double(request.weight_kg) / KG_PER_TON;
        let vehicle = self.rates.vehicle_rate(&request.vehicle_type);

        let add_ons_cost = request.add_ons.iter().fold(0.0, |sum, add_on| {
            sum + match self.rates.add_on_charge(add_on) {
                AddOnCharge::Flat(amount) => to_double(amount),
                AddOnCharge::PerKm(rate) => distance_km * to_double(rate),
            }
        });

        CostComponents {
            distance_cost: distance_km * to_double(vehicle.per_km),
            weight_cost: weight_tons * to_double(self.rates.per_ton()),
            vehicle_type_cost: to_double(vehicle.base_cost),
            add_ons_cost,
        }
    }

    /// Prices a shipment.
    ///
    /// Each reported amount is rounded independently from the unrounded
    /// components; totals are never re-summed from rounded parts.
    #[must_use]
    pub fn calculate_cost(&self, request: &ShipmentCostRequest, route: &RouteInfo) -> CostResult {
        let components = self.components(request, route);
        let add_on_costs = round_currency(components.add_ons_cost);

        CostResult {
            distance: route.distance.clone(),
            duration: route.duration.clone(),
            base_cost: round_currency(components.base_cost()),
            add_on_costs,
            total_cost: round_currency(components.total_cost()),
            breakdown: CostBreakdown {
                distance_cost: round_currency(components.distance_cost),
                weight_cost: round_currency(components.weight_cost),
                vehicle_type_cost: round_currency(components.vehicle_type_cost),
                add_ons_cost: add_on_costs,
            },
            route: route.geometry.clone(),
        }
    }
}

/// Rounds to whole currency units: nearest integer, exact halves up.
///
/// `x - floor(x)` is exact in binary64, so `0.49999999999999994` stays 0
/// where `floor(x + 0.5)` would give 1. Callers keep amounts well inside
/// `i64`; see [`super::MAX_WEIGHT_KG`].
#[must_use]
#[allow(clippy::float_arithmetic, clippy::cast_possible_truncation)]
pub fn round_currency(amount: f64) -> i64 {
    let floor = amount.floor();
    let rounded = if amount - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Nearest double to the decimal text, as a JSON parser would produce it.
fn to_double(amount: Decimal) -> f64 {
    amount.to_string().parse().unwrap_or_default()
}
