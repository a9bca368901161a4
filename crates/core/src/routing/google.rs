//! Google Maps Platform implementation of [`RouteResolver`].
//!
//! Uses the Directions API for full routes and the Distance Matrix API for
//! distance-only lookups. Both are plain JSON-over-HTTPS GET requests.

use std::time::Duration;

use async_trait::async_trait;
use freightdesk_shared::MapsConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::RouteError;
use super::resolver::{RouteResolver, validate_endpoints};
use super::types::{
    Bounds, Distance, LatLng, Location, RouteGeometry, RouteInfo, TravelMeasure, TravelTime,
};

const TRAVEL_MODE: &str = "driving";

/// Route resolver backed by the Google Maps web services.
#[derive(Clone)]
pub struct GoogleMapsResolver {
    http: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GoogleMapsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsResolver")
            .field("base_url", &self.base_url)
            .field("api_key", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl GoogleMapsResolver {
    /// Creates a resolver from application configuration.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Provider` if the HTTP client cannot be built.
    pub fn from_config(config: &MapsConfig) -> Result<Self, RouteError> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Creates a resolver against an explicit base URL.
    ///
    /// `timeout` bounds each provider call; an elapsed timeout surfaces as
    /// `RouteError::Provider`.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Provider` if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RouteError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RouteError::provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, RouteError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{endpoint}/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Routing provider request failed");
                RouteError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, http_status = %status, "Routing provider returned HTTP error");
            return Err(RouteError::provider(format!(
                "{endpoint} request failed with HTTP {status}"
            )));
        }

        response.json::<T>().await.map_err(RouteError::from)
    }
}

#[async_trait]
impl RouteResolver for GoogleMapsResolver {
    async fn resolve_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInfo, RouteError> {
        let (origin, destination) = validate_endpoints(origin, destination)?;

        let body: DirectionsResponse = self
            .get_json(
                "directions",
                &[
                    ("origin", origin),
                    ("destination", destination),
                    ("mode", TRAVEL_MODE),
                ],
            )
            .await?;

        debug!(status = %body.status, routes = body.routes.len(), "Directions response");
        check_status("Directions", &body.status, body.error_message.as_deref())?;

        body.into_route_info()
    }

    async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<TravelMeasure, RouteError> {
        let (origin, destination) = validate_endpoints(origin, destination)?;

        let body: DistanceMatrixResponse = self
            .get_json(
                "distancematrix",
                &[
                    ("origins", origin),
                    ("destinations", destination),
                    ("mode", TRAVEL_MODE),
                    ("units", "metric"),
                ],
            )
            .await?;

        debug!(status = %body.status, "Distance Matrix response");
        check_status("Distance Matrix", &body.status, body.error_message.as_deref())?;

        body.into_measure()
    }
}

/// Maps a provider status string onto success or an error kind.
///
/// Auth, quota and server-side failures are retryable provider errors;
/// every other non-`OK` status means the provider could not route the request.
fn check_status(api: &str, status: &str, detail: Option<&str>) -> Result<(), RouteError> {
    let describe = || match detail {
        Some(detail) => format!("{api} request failed: {status} ({detail})"),
        None => format!("{api} request failed: {status}"),
    };

    match status {
        "OK" => Ok(()),
        "REQUEST_DENIED" | "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" | "UNKNOWN_ERROR" => {
            warn!(api, status, "Routing provider refused request");
            Err(RouteError::provider(describe()))
        }
        _ => Err(RouteError::route_not_found(describe())),
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
    #[serde(default)]
    overview_polyline: Option<EncodedPolyline>,
    #[serde(default)]
    bounds: Option<ProviderBounds>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    #[serde(default)]
    text: String,
    #[serde(default)]
    value: u64,
}

#[derive(Debug, Deserialize)]
struct EncodedPolyline {
    #[serde(default)]
    points: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderBounds {
    #[serde(default)]
    northeast: LatLng,
    #[serde(default)]
    southwest: LatLng,
}

impl DirectionsResponse {
    fn into_route_info(self) -> Result<RouteInfo, RouteError> {
        let route = self.routes.into_iter().next().ok_or_else(|| {
            RouteError::route_not_found("no route found between the specified locations")
        })?;
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::route_not_found("route has no legs"))?;

        let bounds = route.bounds.unwrap_or_default();
        Ok(RouteInfo {
            distance: leg.distance.map(distance_from).unwrap_or_default(),
            duration: leg.duration.map(travel_time_from).unwrap_or_default(),
            geometry: Some(RouteGeometry {
                polyline: route
                    .overview_polyline
                    .map(|p| p.points)
                    .unwrap_or_default(),
                bounds: Bounds {
                    northeast: bounds.northeast,
                    southwest: bounds.southwest,
                },
            }),
        })
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<TextValue>,
    #[serde(default)]
    duration: Option<TextValue>,
}

impl DistanceMatrixResponse {
    fn into_measure(self) -> Result<TravelMeasure, RouteError> {
        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| RouteError::route_not_found("no distance matrix data available"))?;

        check_status("Distance calculation", &element.status, None)?;

        Ok(TravelMeasure {
            distance: element.distance.map(distance_from).unwrap_or_default(),
            duration: element.duration.map(travel_time_from).unwrap_or_default(),
        })
    }
}

fn distance_from(raw: TextValue) -> Distance {
    let fallback = Distance::default();
    Distance {
        text: if raw.text.is_empty() { fallback.text } else { raw.text },
        value: raw.value,
    }
}

fn travel_time_from(raw: TextValue) -> TravelTime {
    let fallback = TravelTime::default();
    TravelTime {
        text: if raw.text.is_empty() { fallback.text } else { raw.text },
        value: raw.value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer) -> GoogleMapsResolver {
        GoogleMapsResolver::new("test-key", server.uri(), Duration::from_millis(500)).unwrap()
    }

    fn directions_ok() -> serde_json::Value {
        json!({
            "status": "OK",
            "routes": [{
                "legs": [{
                    "distance": { "text": "1,400 km", "value": 1_400_000 },
                    "duration": { "text": "1 day 2 hours", "value": 93_600 }
                }],
                "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" },
                "bounds": {
                    "northeast": { "lat": 28.7, "lng": 77.2 },
                    "southwest": { "lat": 19.0, "lng": 72.8 }
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_resolve_route_extracts_first_leg() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/directions/json"))
            .and(query_param("origin", "Mumbai"))
            .and(query_param("destination", "Delhi"))
            .and(query_param("mode", "driving"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_ok()))
            .expect(1)
            .mount(&server)
            .await;

        let route = resolver_for(&server)
            .resolve_route(&Location::new("  Mumbai "), &Location::new("Delhi"))
            .await
            .unwrap();

        assert_eq!(route.distance.value, 1_400_000);
        assert_eq!(route.distance.text, "1,400 km");
        assert_eq!(route.duration.value, 93_600);
        let geometry = route.geometry.unwrap();
        assert_eq!(geometry.polyline, "a~l~Fjk~uOwHJy@P");
        assert_eq!(geometry.bounds.northeast, LatLng { lat: 28.7, lng: 77.2 });
    }

    #[tokio::test]
    async fn test_missing_optional_fields_default() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "routes": [{ "legs": [{}] }]
            })))
            .mount(&server)
            .await;

        let route = resolver_for(&server)
            .resolve_route(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap();

        assert_eq!(route.distance, Distance::default());
        assert_eq!(route.duration, TravelTime::default());
        let geometry = route.geometry.unwrap();
        assert_eq!(geometry.polyline, "");
        assert_eq!(geometry.bounds, Bounds::default());
    }

    #[tokio::test]
    async fn test_partial_bounds_default_missing_coordinates() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "routes": [{
                    "legs": [{ "distance": { "text": "5 km", "value": 5_000 } }],
                    "bounds": { "northeast": { "lat": 1.0 }, "southwest": {} }
                }]
            })))
            .mount(&server)
            .await;

        let route = resolver_for(&server)
            .resolve_route(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap();

        let bounds = route.geometry.unwrap().bounds;
        assert_eq!(bounds.northeast, LatLng { lat: 1.0, lng: 0.0 });
        assert_eq!(bounds.southwest, LatLng::default());
    }

    #[tokio::test]
    async fn test_zero_routes_is_route_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "routes": [] })),
            )
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_route(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::RouteNotFound(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_zero_results_status_is_route_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "routes": [] })),
            )
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_route(&Location::new("Honolulu"), &Location::new("Tokyo"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RouteError::route_not_found("Directions request failed: ZERO_RESULTS")
        );
    }

    #[tokio::test]
    async fn test_denied_and_quota_are_provider_errors() {
        for status in ["REQUEST_DENIED", "OVER_QUERY_LIMIT"] {
            let server = MockServer::start().await;
            Mock::given(path("/directions/json"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "status": status,
                    "error_message": "The provided API key is invalid.",
                    "routes": []
                })))
                .mount(&server)
                .await;

            let err = resolver_for(&server)
                .resolve_route(&Location::new("A"), &Location::new("B"))
                .await
                .unwrap_err();

            assert!(err.is_retryable(), "{status} should be retryable");
            assert!(err.to_string().contains("API key is invalid"));
        }
    }

    #[tokio::test]
    async fn test_http_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_route(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::Provider(_)));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_as_provider_error() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(directions_ok())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_route(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::Provider(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_blank_address_skips_provider_call() {
        let server = MockServer::start().await;
        Mock::given(path("/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_ok()))
            .expect(0)
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_route(&Location::new("   "), &Location::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_measure_uses_distance_matrix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/distancematrix/json"))
            .and(query_param("origins", "Pune"))
            .and(query_param("destinations", "Nashik"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "rows": [{
                    "elements": [{
                        "status": "OK",
                        "distance": { "text": "211 km", "value": 211_000 },
                        "duration": { "text": "4 hours", "value": 14_400 }
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let measure = resolver_for(&server)
            .measure(&Location::new("Pune"), &Location::new("Nashik"))
            .await
            .unwrap();

        assert_eq!(measure.distance.value, 211_000);
        assert_eq!(measure.duration.text, "4 hours");
    }

    #[tokio::test]
    async fn test_measure_element_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/distancematrix/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "rows": [{ "elements": [{ "status": "NOT_FOUND" }] }]
            })))
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .measure(&Location::new("Nowhere"), &Location::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(err, RouteError::RouteNotFound(_)));
    }

    #[test]
    fn test_check_status_classification() {
        assert!(check_status("Directions", "OK", None).is_ok());
        assert!(matches!(
            check_status("Directions", "MAX_ROUTE_LENGTH_EXCEEDED", None),
            Err(RouteError::RouteNotFound(_))
        ));
        assert!(matches!(
            check_status("Directions", "UNKNOWN_ERROR", None),
            Err(RouteError::Provider(_))
        ));
    }
}
