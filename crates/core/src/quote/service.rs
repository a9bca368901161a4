//! Orchestrates validation, route resolution and pricing.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::error::QuoteError;
use crate::pricing::{CostEngine, CostResult, MAX_WEIGHT_KG, ShipmentCostRequest, VehicleType};
use crate::routing::{
    Location, RouteError, RouteInfo, RouteResolver, TravelMeasure, validate_endpoints,
};

/// Produces shipment quotes.
///
/// Holds no per-request state and is shared across handlers behind an `Arc`.
pub struct QuoteService {
    resolver: Arc<dyn RouteResolver>,
    engine: CostEngine,
    deadline: Option<Duration>,
}

impl QuoteService {
    /// Creates a service with no overall deadline.
    #[must_use]
    pub fn new(resolver: Arc<dyn RouteResolver>, engine: CostEngine) -> Self {
        Self {
            resolver,
            engine,
            deadline: None,
        }
    }

    /// Bounds every route lookup; exceeding it is a provider failure.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Quotes a shipment.
    ///
    /// Validation runs before the route lookup, and pricing only runs once a
    /// route has been resolved.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for blank addresses, an empty vehicle type, or a
    ///   weight outside `(0, MAX_WEIGHT_KG]`
    /// - `RouteNotFound` when no route exists
    /// - `Provider` for transport, auth, quota or deadline failures
    #[instrument(skip_all, fields(vehicle = request.vehicle_type.code()))]
    pub async fn quote(&self, request: &ShipmentCostRequest) -> Result<CostResult, QuoteError> {
        validate_request(request)?;

        let route = self.resolve(&request.pickup, &request.drop).await?;
        let result = self.engine.calculate_cost(request, &route);

        debug!(
            distance_m = result.distance.value,
            total_cost = result.total_cost,
            "shipment quoted"
        );
        Ok(result)
    }

    /// Distance and duration only, without pricing.
    ///
    /// # Errors
    ///
    /// Same kinds as [`Self::quote`], minus the cargo checks.
    #[instrument(skip_all)]
    pub async fn measure(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<TravelMeasure, QuoteError> {
        validate_endpoints(origin, destination)?;
        let lookup = self.resolver.measure(origin, destination);
        Ok(self.bounded(lookup).await?)
    }

    async fn resolve(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInfo, QuoteError> {
        let lookup = self.resolver.resolve_route(origin, destination);
        self.bounded(lookup).await.map_err(|err| {
            warn!(error = %err, retryable = err.is_retryable(), "route resolution failed");
            QuoteError::from(err)
        })
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, RouteError>>,
    ) -> Result<T, RouteError> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, lookup)
                .await
                .map_err(|_| RouteError::provider(format!("route lookup exceeded {deadline:?}")))?,
            None => lookup.await,
        }
    }
}

fn validate_request(request: &ShipmentCostRequest) -> Result<(), QuoteError> {
    validate_endpoints(&request.pickup, &request.drop)?;

    if matches!(&request.vehicle_type, VehicleType::Other(code) if code.trim().is_empty()) {
        return Err(QuoteError::invalid_request("vehicle type is required"));
    }
    if request.weight_kg <= Decimal::ZERO {
        return Err(QuoteError::invalid_request("weight must be greater than zero"));
    }
    if request.weight_kg > MAX_WEIGHT_KG {
        return Err(QuoteError::invalid_request(format!(
            "weight must not exceed {MAX_WEIGHT_KG} kg"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::pricing::AddOn;
    use crate::routing::{Distance, TravelTime};

    struct StubResolver {
        outcome: Result<RouteInfo, RouteError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubResolver {
        fn ok(meters: u64) -> Self {
            Self {
                outcome: Ok(RouteInfo {
                    distance: Distance {
                        text: format!("{} km", meters / 1000),
                        value: meters,
                    },
                    duration: TravelTime {
                        text: "20 hours".into(),
                        value: 72_000,
                    },
                    geometry: None,
                }),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: RouteError) -> Self {
            Self {
                outcome: Err(err),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RouteResolver for StubResolver {
        async fn resolve_route(
            &self,
            _origin: &Location,
            _destination: &Location,
        ) -> Result<RouteInfo, RouteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    fn service(resolver: &Arc<StubResolver>) -> QuoteService {
        QuoteService::new(resolver.clone(), CostEngine::standard())
    }

    fn request() -> ShipmentCostRequest {
        ShipmentCostRequest {
            pickup: Location::new("Mumbai"),
            drop: Location::new("Delhi"),
            vehicle_type: VehicleType::Truck,
            weight_kg: dec!(5000),
            commodity: Some("Steel".into()),
            add_ons: vec![AddOn::ExpressDelivery, AddOn::Insurance],
        }
    }

    #[tokio::test]
    async fn test_quote_prices_resolved_route() {
        let resolver = Arc::new(StubResolver::ok(1_400_000));
        let result = service(&resolver).quote(&request()).await.unwrap();

        assert_eq!(result.total_cost, 25_200);
        assert_eq!(result.base_cost, 24_500);
        assert_eq!(result.duration.value, 72_000);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_requests_never_reach_the_provider() {
        let resolver = Arc::new(StubResolver::ok(1_000));
        let quotes = service(&resolver);

        let mut blank_pickup = request();
        blank_pickup.pickup = Location::new("   ");
        let mut zero_weight = request();
        zero_weight.weight_kg = Decimal::ZERO;
        let mut no_vehicle = request();
        no_vehicle.vehicle_type = VehicleType::from_code("");
        let mut overweight = request();
        overweight.weight_kg = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);

        for bad in [blank_pickup, zero_weight, no_vehicle, overweight] {
            let err = quotes.quote(&bad).await.unwrap_err();
            assert!(matches!(err, QuoteError::InvalidRequest(_)), "{err:?}");
        }
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_weight_ceiling_is_inclusive() {
        let resolver = Arc::new(StubResolver::ok(1_000));
        let mut heaviest = request();
        heaviest.weight_kg = MAX_WEIGHT_KG;

        let result = service(&resolver).quote(&heaviest).await.unwrap();
        assert_eq!(result.breakdown.weight_cost, 500_000_000);
    }

    #[tokio::test]
    async fn test_route_not_found_is_not_retryable() {
        let resolver = Arc::new(StubResolver::failing(RouteError::route_not_found(
            "ZERO_RESULTS",
        )));
        let err = service(&resolver).quote(&request()).await.unwrap_err();

        assert_eq!(err, QuoteError::RouteNotFound("ZERO_RESULTS".into()));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_provider_failure_is_retryable() {
        let resolver = Arc::new(StubResolver::failing(RouteError::provider("OVER_QUERY_LIMIT")));
        let err = service(&resolver).quote(&request()).await.unwrap_err();

        assert!(err.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_turns_slow_lookup_into_provider_error() {
        let mut slow = StubResolver::ok(1_000);
        slow.delay = Duration::from_secs(30);
        let resolver = Arc::new(slow);

        let err = service(&resolver)
            .with_deadline(Duration::from_secs(5))
            .quote(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::Provider(_)));
    }

    #[tokio::test]
    async fn test_measure_uses_resolver() {
        let resolver = Arc::new(StubResolver::ok(12_345));
        let measure = service(&resolver)
            .measure(&Location::new("A"), &Location::new("B"))
            .await
            .unwrap();

        assert_eq!(measure.distance.value, 12_345);

        let err = service(&resolver)
            .measure(&Location::new("A"), &Location::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::InvalidRequest(_)));
    }
}
