//! Route resolution against an external routing provider.
//!
//! ```text
//! Location ──┐
//!            ├─► RouteResolver::resolve_route ─► RouteInfo { distance, duration, geometry }
//! Location ──┘
//! ```
//!
//! Resolution is one provider call per invocation. Nothing is cached between
//! requests.

mod error;
pub mod google;
mod resolver;
mod types;

pub use error::RouteError;
pub use google::GoogleMapsResolver;
pub use resolver::{RouteResolver, validate_endpoints};
pub use types::{Bounds, Distance, LatLng, Location, RouteGeometry, RouteInfo, TravelMeasure, TravelTime};
