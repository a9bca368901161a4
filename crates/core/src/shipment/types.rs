//! Shipment request and validated shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pricing::{AddOn, ShipmentCostRequest, VehicleType};
use crate::routing::Location;

/// Body of a shipment booking.
///
/// Every field defaults to empty so that missing and blank values are
/// reported the same way by [`ShipmentDraft::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentDraft {
    /// Requested vehicle class.
    pub vehicle_type: String,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop address.
    pub drop_address: String,
    /// Commodity being shipped.
    pub commodity: String,
    /// Weight in kilograms, as a numeric string.
    pub weight: String,
    /// Free-form handling notes.
    pub special_instructions: Option<String>,
    /// Contact at pickup.
    pub pickup_contact_name: String,
    /// Phone number at pickup.
    pub pickup_contact_number: String,
    /// Contact at drop.
    pub drop_contact_name: String,
    /// Phone number at drop.
    pub drop_contact_number: String,
    /// Requested add-on services.
    pub add_ons: Option<Vec<String>>,
    /// Pickup date.
    pub pickup_date: Option<String>,
    /// Drop date.
    pub drop_date: Option<String>,
    /// Pickup time slot, as supplied.
    pub pickup_time: Option<String>,
    /// Drop time slot, as supplied.
    pub drop_time: Option<String>,
    /// Truck option label.
    pub truck_option: Option<String>,
}

/// Partial update of a booked shipment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentPatch {
    /// Requested vehicle class.
    pub vehicle_type: Option<String>,
    /// Pickup address.
    pub pickup_address: Option<String>,
    /// Drop address.
    pub drop_address: Option<String>,
    /// Commodity being shipped.
    pub commodity: Option<String>,
    /// Weight in kilograms.
    pub weight: Option<String>,
    /// Free-form handling notes.
    pub special_instructions: Option<String>,
    /// Contact at pickup.
    pub pickup_contact_name: Option<String>,
    /// Phone number at pickup.
    pub pickup_contact_number: Option<String>,
    /// Contact at drop.
    pub drop_contact_name: Option<String>,
    /// Phone number at drop.
    pub drop_contact_number: Option<String>,
    /// Requested add-on services.
    pub add_ons: Option<Vec<String>>,
    /// Pickup date.
    pub pickup_date: Option<String>,
    /// Drop date.
    pub drop_date: Option<String>,
    /// Pickup time slot, as supplied.
    pub pickup_time: Option<String>,
    /// Drop time slot, as supplied.
    pub drop_time: Option<String>,
    /// Truck option label.
    pub truck_option: Option<String>,
}

/// Body of a price-only quote.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteDraft {
    /// Pickup address.
    pub pickup_address: String,
    /// Drop address.
    pub drop_address: String,
    /// Requested vehicle class.
    pub vehicle_type: String,
    /// Weight in kilograms, as a JSON number.
    pub weight: Decimal,
    /// Commodity being shipped.
    pub commodity: Option<String>,
    /// Requested add-on services.
    pub add_ons: Option<Vec<String>>,
}

impl QuoteDraft {
    /// Builds the pricing request. Field checks happen in the quote service.
    #[must_use]
    pub fn into_request(self) -> ShipmentCostRequest {
        ShipmentCostRequest {
            pickup: Location::new(self.pickup_address),
            drop: Location::new(self.drop_address),
            vehicle_type: VehicleType::from_code(&self.vehicle_type),
            weight_kg: self.weight,
            commodity: self.commodity,
            add_ons: parse_add_ons(self.add_ons.unwrap_or_default()),
        }
    }
}

/// A shipment draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedShipment {
    /// Requested vehicle class.
    pub vehicle_type: VehicleType,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop address.
    pub drop_address: String,
    /// Commodity being shipped.
    pub commodity: String,
    /// Cargo weight in kilograms.
    pub weight_kg: Decimal,
    /// Free-form handling notes.
    pub special_instructions: String,
    /// Contact at pickup.
    pub pickup_contact_name: String,
    /// Phone number at pickup.
    pub pickup_contact_number: String,
    /// Contact at drop.
    pub drop_contact_name: String,
    /// Phone number at drop.
    pub drop_contact_number: String,
    /// Requested add-on services.
    pub add_ons: Vec<AddOn>,
    /// Pickup date.
    pub pickup_date: Option<NaiveDate>,
    /// Drop date.
    pub drop_date: Option<NaiveDate>,
    /// Pickup time slot, as supplied.
    pub pickup_time: Option<String>,
    /// Drop time slot, as supplied.
    pub drop_time: Option<String>,
    /// Truck option label.
    pub truck_option: Option<String>,
}

impl ValidatedShipment {
    /// The pricing request for this shipment.
    #[must_use]
    pub fn cost_request(&self) -> ShipmentCostRequest {
        ShipmentCostRequest {
            pickup: Location::new(self.pickup_address.clone()),
            drop: Location::new(self.drop_address.clone()),
            vehicle_type: self.vehicle_type.clone(),
            weight_kg: self.weight_kg,
            commodity: Some(self.commodity.clone()),
            add_ons: self.add_ons.clone(),
        }
    }
}

/// A shipment patch that passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedPatch {
    /// Requested vehicle class.
    pub vehicle_type: Option<VehicleType>,
    /// Pickup address.
    pub pickup_address: Option<String>,
    /// Drop address.
    pub drop_address: Option<String>,
    /// Commodity being shipped.
    pub commodity: Option<String>,
    /// Cargo weight in kilograms.
    pub weight_kg: Option<Decimal>,
    /// Free-form handling notes.
    pub special_instructions: Option<String>,
    /// Contact at pickup.
    pub pickup_contact_name: Option<String>,
    /// Phone number at pickup.
    pub pickup_contact_number: Option<String>,
    /// Contact at drop.
    pub drop_contact_name: Option<String>,
    /// Phone number at drop.
    pub drop_contact_number: Option<String>,
    /// Requested add-on services.
    pub add_ons: Option<Vec<AddOn>>,
    /// Pickup date.
    pub pickup_date: Option<NaiveDate>,
    /// Drop date.
    pub drop_date: Option<NaiveDate>,
    /// Pickup time slot, as supplied.
    pub pickup_time: Option<String>,
    /// Drop time slot, as supplied.
    pub drop_time: Option<String>,
    /// Truck option label.
    pub truck_option: Option<String>,
}

impl ValidatedPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub(super) fn parse_add_ons(codes: Vec<String>) -> Vec<AddOn> {
    codes.into_iter().map(AddOn::from).collect()
}
