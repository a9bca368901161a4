//! Freightdesk API Server
//!
//! Main entry point for the shipment quoting and booking service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freightdesk_api::{AppState, create_router};
use freightdesk_core::pricing::CostEngine;
use freightdesk_core::quote::QuoteService;
use freightdesk_core::routing::GoogleMapsResolver;
use freightdesk_db::connect;
use freightdesk_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freightdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("failed to connect to database")?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .unwrap_or(i64::MAX),
    });

    let resolver = GoogleMapsResolver::from_config(&config.maps)
        .context("failed to build routing provider client")?;
    info!(
        base_url = %config.maps.base_url,
        timeout_secs = config.maps.timeout_secs,
        "Routing provider configured"
    );
    let quotes = QuoteService::new(Arc::new(resolver), CostEngine::standard())
        .with_deadline(Duration::from_secs(config.server.quote_deadline_secs));

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        quotes: Arc::new(quotes),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
