//! Static rate tables.
//!
//! Rates are data, not control flow: changing a price means editing a table
//! entry in [`RateTable::standard`].

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::types::{AddOn, VehicleType};

/// Per-vehicle pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleRate {
    /// Charge per kilometer driven.
    pub per_km: Decimal,
    /// Flat charge for booking the vehicle.
    pub base_cost: Decimal,
}

/// How an add-on is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOnCharge {
    /// Fixed amount per entry.
    Flat(Decimal),
    /// Amount per kilometer of route distance.
    PerKm(Decimal),
}

/// Complete rate configuration for the cost engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    vehicles: HashMap<VehicleType, VehicleRate>,
    default_vehicle: VehicleRate,
    add_ons: HashMap<AddOn, AddOnCharge>,
    default_add_on: AddOnCharge,
    per_ton: Decimal,
}

/// Whole currency units as a `Decimal`, usable in constants.
const fn units(amount: u32) -> Decimal {
    Decimal::from_parts(amount, 0, 0, false, 0)
}

const STANDARD_VEHICLES: [(VehicleType, i64, i64); 5] = [
    (VehicleType::Truck, 15, 1000),
    (VehicleType::MiniTruck, 12, 800),
    (VehicleType::Tempo, 10, 600),
    (VehicleType::Pickup, 8, 400),
    (VehicleType::TractorTrailer, 20, 1500),
];

const STANDARD_ADD_ONS: [(AddOn, AddOnCharge); 8] = [
    (AddOn::ExpressDelivery, AddOnCharge::Flat(units(500))),
    (AddOn::FragileHandling, AddOnCharge::Flat(units(300))),
    (AddOn::TemperatureControlled, AddOnCharge::PerKm(units(2))),
    (AddOn::Insurance, AddOnCharge::Flat(units(200))),
    (AddOn::WeekendDelivery, AddOnCharge::Flat(units(400))),
    (AddOn::NightDelivery, AddOnCharge::Flat(units(600))),
    (AddOn::LoadingUnloading, AddOnCharge::Flat(units(250))),
    (AddOn::Packaging, AddOnCharge::Flat(units(150))),
];

impl RateTable {
    /// The published tariff.
    ///
    /// Unknown vehicles are charged like a truck (15/km, 1000 base);
    /// unknown add-ons cost a flat 100. Weight is charged at 500 per ton.
    #[must_use]
    pub fn standard() -> Self {
        let vehicles = STANDARD_VEHICLES
            .into_iter()
            .map(|(vehicle, per_km, base)| {
                (
                    vehicle,
                    VehicleRate {
                        per_km: Decimal::from(per_km),
                        base_cost: Decimal::from(base),
                    },
                )
            })
            .collect();

        Self {
            vehicles,
            default_vehicle: VehicleRate {
                per_km: Decimal::from(15),
                base_cost: Decimal::from(1000),
            },
            add_ons: STANDARD_ADD_ONS.into_iter().collect(),
            default_add_on: AddOnCharge::Flat(Decimal::ONE_HUNDRED),
            per_ton: Decimal::from(500),
        }
    }

    /// Overrides the rate for one vehicle class.
    #[must_use]
    pub fn with_vehicle_rate(mut self, vehicle: VehicleType, rate: VehicleRate) -> Self {
        self.vehicles.insert(vehicle, rate);
        self
    }

    /// Overrides the charge for one add-on.
    #[must_use]
    pub fn with_add_on_charge(mut self, add_on: AddOn, charge: AddOnCharge) -> Self {
        self.add_ons.insert(add_on, charge);
        self
    }

    /// Rate for a vehicle class, falling back to the default rate.
    #[must_use]
    pub fn vehicle_rate(&self, vehicle: &VehicleType) -> VehicleRate {
        self.vehicles
            .get(vehicle)
            .copied()
            .unwrap_or(self.default_vehicle)
    }

    /// Charge for an add-on, falling back to the default charge.
    #[must_use]
    pub fn add_on_charge(&self, add_on: &AddOn) -> AddOnCharge {
        self.add_ons
            .get(add_on)
            .copied()
            .unwrap_or(self.default_add_on)
    }

    /// Charge per metric ton of cargo.
    #[must_use]
    pub const fn per_ton(&self) -> Decimal {
        self.per_ton
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}
