//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for shipment quoting and booking
//! - Bearer-token authentication middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::http::header::AUTHORIZATION;
use freightdesk_core::quote::QuoteService;
use freightdesk_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::iter::once;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Quote pipeline (route resolution + pricing).
    pub quotes: Arc<QuoteService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
