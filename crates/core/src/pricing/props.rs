//! Property-based tests for the cost engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{CostEngine, round_currency};
use super::types::{AddOn, ShipmentCostRequest, VehicleType};
use crate::routing::{Distance, Location, RouteInfo, TravelTime};

/// Route distances from 1 m to 5000 km.
fn meters() -> impl Strategy<Value = u64> {
    1u64..5_000_000
}

/// Weights from 0.1 kg to 50 t, one decimal place.
fn weight_kg() -> impl Strategy<Value = Decimal> {
    (1i64..500_000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn vehicle() -> impl Strategy<Value = VehicleType> {
    prop::sample::select(vec![
        "truck",
        "mini_truck",
        "tempo",
        "pickup",
        "tractor_trailer",
        "hovercraft",
    ])
    .prop_map(VehicleType::from_code)
}

fn add_ons() -> impl Strategy<Value = Vec<AddOn>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "express_delivery",
            "fragile_handling",
            "temperature_controlled",
            "insurance",
            "weekend_delivery",
            "night_delivery",
            "loading_unloading",
            "packaging",
            "gift_wrap",
        ])
        .prop_map(AddOn::from_code),
        0..6,
    )
}

fn route(meters: u64) -> RouteInfo {
    RouteInfo {
        distance: Distance {
            text: String::new(),
            value: meters,
        },
        duration: TravelTime::default(),
        geometry: None,
    }
}

fn request(vehicle_type: VehicleType, weight_kg: Decimal, add_ons: Vec<AddOn>) -> ShipmentCostRequest {
    ShipmentCostRequest {
        pickup: Location::new("A"),
        drop: Location::new("B"),
        vehicle_type,
        weight_kg,
        commodity: None,
        add_ons,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Identical inputs always price identically.
    #[test]
    fn prop_pricing_is_deterministic(
        m in meters(),
        w in weight_kg(),
        v in vehicle(),
        a in add_ons(),
    ) {
        let engine = CostEngine::standard();
        let req = request(v, w, a);
        prop_assert_eq!(
            engine.calculate_cost(&req, &route(m)),
            engine.calculate_cost(&req, &route(m))
        );
    }

    /// Reported base and total are rounded from the unrounded sums.
    #[test]
    fn prop_totals_round_unrounded_sums(
        m in meters(),
        w in weight_kg(),
        v in vehicle(),
        a in add_ons(),
    ) {
        let engine = CostEngine::standard();
        let req = request(v, w, a);
        let c = engine.components(&req, &route(m));
        let result = engine.calculate_cost(&req, &route(m));
        prop_assert_eq!(result.base_cost, round_currency(c.base_cost()));
        prop_assert_eq!(result.total_cost, round_currency(c.total_cost()));
        prop_assert_eq!(result.add_on_costs, round_currency(c.add_ons_cost));
    }

    /// Rounded total stays within one unit of the rounded parts.
    #[test]
    fn prop_total_close_to_rounded_parts(
        m in meters(),
        w in weight_kg(),
        v in vehicle(),
        a in add_ons(),
    ) {
        let result = CostEngine::standard().calculate_cost(&request(v, w, a), &route(m));
        let b = result.breakdown;
        let parts = b.distance_cost + b.weight_cost + b.vehicle_type_cost + b.add_ons_cost;
        prop_assert!((result.total_cost - parts).abs() <= 2);
        prop_assert_eq!(result.add_on_costs, b.add_ons_cost);
    }

    /// More distance never costs less.
    #[test]
    fn prop_monotonic_in_distance(
        m in meters(),
        extra in 0u64..1_000_000,
        w in weight_kg(),
        v in vehicle(),
        a in add_ons(),
    ) {
        let engine = CostEngine::standard();
        let req = request(v, w, a);
        let near = engine.calculate_cost(&req, &route(m));
        let far = engine.calculate_cost(&req, &route(m + extra));
        prop_assert!(far.total_cost >= near.total_cost);
        prop_assert!(far.breakdown.distance_cost >= near.breakdown.distance_cost);
        prop_assert!(far.add_on_costs >= near.add_on_costs);
    }

    /// More weight never costs less.
    #[test]
    fn prop_monotonic_in_weight(
        m in meters(),
        w in weight_kg(),
        extra in weight_kg(),
        v in vehicle(),
    ) {
        let engine = CostEngine::standard();
        let light = engine.calculate_cost(&request(v.clone(), w, vec![]), &route(m));
        let heavy = engine.calculate_cost(&request(v, w + extra, vec![]), &route(m));
        prop_assert!(heavy.total_cost >= light.total_cost);
        prop_assert!(heavy.breakdown.weight_cost >= light.breakdown.weight_cost);
    }

    /// Every reported amount is non-negative.
    #[test]
    fn prop_amounts_are_non_negative(
        m in meters(),
        w in weight_kg(),
        v in vehicle(),
        a in add_ons(),
    ) {
        let r = CostEngine::standard().calculate_cost(&request(v, w, a), &route(m));
        prop_assert!(r.base_cost >= 0);
        prop_assert!(r.add_on_costs >= 0);
        prop_assert!(r.total_cost >= r.base_cost);
        prop_assert!(r.breakdown.distance_cost >= 0);
        prop_assert!(r.breakdown.weight_cost >= 0);
    }
}
