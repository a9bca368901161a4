//! Route data contracts.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    #[serde(default)]
    pub lat: f64,
    /// Longitude.
    #[serde(default)]
    pub lng: f64,
}

/// An address, optionally enriched with resolved coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Free-text address as entered by the customer.
    pub address: String,
    /// Coordinates, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<LatLng>,
}

impl Location {
    /// Creates a location from an address without coordinates.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coordinates: None,
        }
    }

    /// Returns the trimmed address, or `None` when it is blank.
    #[must_use]
    pub fn resolvable_address(&self) -> Option<&str> {
        let trimmed = self.address.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Driving distance as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    /// Human readable label, e.g. `"1,400 km"`.
    pub text: String,
    /// Distance in meters.
    pub value: u64,
}

impl Default for Distance {
    fn default() -> Self {
        Self {
            text: "0 km".to_string(),
            value: 0,
        }
    }
}

/// Driving time as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTime {
    /// Human readable label, e.g. `"20 hours 5 mins"`.
    pub text: String,
    /// Duration in seconds.
    pub value: u64,
}

impl Default for TravelTime {
    fn default() -> Self {
        Self {
            text: "0 mins".to_string(),
            value: 0,
        }
    }
}

/// Bounding box of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// North-east corner.
    pub northeast: LatLng,
    /// South-west corner.
    pub southwest: LatLng,
}

/// Drawable shape of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Encoded overview polyline.
    pub polyline: String,
    /// Bounding box.
    pub bounds: Bounds,
}

/// A resolved origin → destination route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Distance of the first leg.
    pub distance: Distance,
    /// Duration of the first leg.
    pub duration: TravelTime,
    /// Geometry, when the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RouteGeometry>,
}

/// Distance and duration only, without geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelMeasure {
    /// Driving distance.
    pub distance: Distance,
    /// Driving time.
    pub duration: TravelTime,
}

impl From<RouteInfo> for TravelMeasure {
    fn from(route: RouteInfo) -> Self {
        Self {
            distance: route.distance,
            duration: route.duration,
        }
    }
}
