//! Draft and patch validation.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use super::error::ShipmentError;
use super::types::{ShipmentDraft, ShipmentPatch, ValidatedPatch, ValidatedShipment, parse_add_ons};
use crate::pricing::{MAX_WEIGHT_KG, VehicleType};

impl ShipmentDraft {
    /// Checks required fields, weight and dates.
    ///
    /// # Errors
    ///
    /// Returns the first failing field, in declaration order.
    pub fn validate(self) -> Result<ValidatedShipment, ShipmentError> {
        let vehicle_type = required(self.vehicle_type, "vehicle type")?;
        let pickup_address = required(self.pickup_address, "pickup address")?;
        let drop_address = required(self.drop_address, "drop address")?;
        let commodity = required(self.commodity, "commodity")?;
        let weight = required(self.weight, "weight")?;
        let pickup_contact_name = required(self.pickup_contact_name, "pickup contact name")?;
        let pickup_contact_number = required(self.pickup_contact_number, "pickup contact number")?;
        let drop_contact_name = required(self.drop_contact_name, "drop contact name")?;
        let drop_contact_number = required(self.drop_contact_number, "drop contact number")?;

        Ok(ValidatedShipment {
            vehicle_type: VehicleType::from_code(&vehicle_type),
            pickup_address,
            drop_address,
            commodity,
            weight_kg: parse_weight(&weight)?,
            special_instructions: self.special_instructions.unwrap_or_default(),
            pickup_contact_name,
            pickup_contact_number,
            drop_contact_name,
            drop_contact_number,
            add_ons: parse_add_ons(self.add_ons.unwrap_or_default()),
            pickup_date: optional_date(self.pickup_date, "pickup date")?,
            drop_date: optional_date(self.drop_date, "drop date")?,
            pickup_time: non_blank(self.pickup_time),
            drop_time: non_blank(self.drop_time),
            truck_option: non_blank(self.truck_option),
        })
    }
}

impl ShipmentPatch {
    /// Validates only the fields present. Present required fields must
    /// not be blank.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(self) -> Result<ValidatedPatch, ShipmentError> {
        Ok(ValidatedPatch {
            vehicle_type: present(self.vehicle_type, "vehicle type")?
                .map(|code| VehicleType::from_code(&code)),
            pickup_address: present(self.pickup_address, "pickup address")?,
            drop_address: present(self.drop_address, "drop address")?,
            commodity: present(self.commodity, "commodity")?,
            weight_kg: present(self.weight, "weight")?
                .map(|weight| parse_weight(&weight))
                .transpose()?,
            special_instructions: self.special_instructions,
            pickup_contact_name: present(self.pickup_contact_name, "pickup contact name")?,
            pickup_contact_number: present(self.pickup_contact_number, "pickup contact number")?,
            drop_contact_name: present(self.drop_contact_name, "drop contact name")?,
            drop_contact_number: present(self.drop_contact_number, "drop contact number")?,
            add_ons: self.add_ons.map(parse_add_ons),
            pickup_date: optional_date(self.pickup_date, "pickup date")?,
            drop_date: optional_date(self.drop_date, "drop date")?,
            pickup_time: non_blank(self.pickup_time),
            drop_time: non_blank(self.drop_time),
            truck_option: non_blank(self.truck_option),
        })
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
///
/// Timestamps keep the date as written, ignoring the offset.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn required(value: String, field: &'static str) -> Result<String, ShipmentError> {
    if value.trim().is_empty() {
        Err(ShipmentError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn present(value: Option<String>, field: &'static str) -> Result<Option<String>, ShipmentError> {
    value.map(|v| required(v, field)).transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_weight(raw: &str) -> Result<Decimal, ShipmentError> {
    match Decimal::from_str(raw.trim()) {
        Ok(weight) if weight > Decimal::ZERO && weight <= MAX_WEIGHT_KG => Ok(weight),
        _ => Err(ShipmentError::InvalidWeight(raw.to_string())),
    }
}

fn optional_date(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ShipmentError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or(ShipmentError::InvalidDate { field, value: raw }),
    }
}
