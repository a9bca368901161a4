//! The route resolver seam.

use async_trait::async_trait;

use super::error::RouteError;
use super::types::{Location, RouteInfo, TravelMeasure};

/// Resolves driving routes between two locations.
///
/// Implementations must be stateless with respect to individual requests:
/// every call performs its own lookup.
#[async_trait]
pub trait RouteResolver: Send + Sync {
    /// Resolves the driving route from `origin` to `destination`.
    ///
    /// Only the first leg of the first route is reported.
    async fn resolve_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInfo, RouteError>;

    /// Returns only distance and duration between two locations.
    ///
    /// Defaults to a full route resolution; providers with a cheaper
    /// distance-only lookup may override it.
    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<TravelMeasure, RouteError> {
        self.resolve_route(origin, destination)
            .await
            .map(TravelMeasure::from)
    }
}

/// Checks both endpoints carry a non-blank address and returns them trimmed.
pub fn validate_endpoints<'a>(
    origin: &'a Location,
    destination: &'a Location,
) -> Result<(&'a str, &'a str), RouteError> {
    let origin = origin
        .resolvable_address()
        .ok_or_else(|| RouteError::invalid_request("pickup address is required"))?;
    let destination = destination
        .resolvable_address()
        .ok_or_else(|| RouteError::invalid_request("drop address is required"))?;
    Ok((origin, destination))
}
