//! Shipment quoting and booking routes.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use freightdesk_core::pricing::CostResult;
use freightdesk_core::routing::{Location, TravelMeasure};
use freightdesk_core::shipment::{QuoteDraft, ShipmentDraft, ShipmentPatch};
use freightdesk_db::{CreateShipmentInput, ShipmentRepository, entities::shipments};
use freightdesk_shared::AppError;
use freightdesk_shared::types::{PageRequest, PageResponse};

/// Creates the shipment routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shipments", get(list_shipments).post(create_shipment))
        .route("/shipments/calculate-cost", post(calculate_cost))
        .route("/shipments/distance-duration", get(distance_duration))
        .route(
            "/shipments/{id}",
            get(get_shipment)
                .put(update_shipment)
                .delete(delete_shipment),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a newly booked shipment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedShipment {
    /// Stored shipment.
    pub shipment: shipments::Model,
    /// Quote the shipment was priced at.
    pub cost_calculation: CostResult,
}

/// Query for the distance/duration lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    /// Pickup address.
    pub pickup_address: Option<String>,
    /// Drop address.
    pub drop_address: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /shipments/calculate-cost - price a shipment without booking it.
async fn calculate_cost(
    State(state): State<AppState>,
    payload: Result<Json<QuoteDraft>, JsonRejection>,
) -> Result<Json<CostResult>, ApiError> {
    let Json(draft) = payload?;
    let cost = state.quotes.quote(&draft.into_request()).await?;
    Ok(Json(cost))
}

/// POST /shipments - validate, price and store a shipment.
async fn create_shipment(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ShipmentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedShipment>), ApiError> {
    let Json(draft) = payload?;
    let shipment = draft.validate()?;
    let cost = state.quotes.quote(&shipment.cost_request()).await?;

    let repo = ShipmentRepository::new((*state.db).clone());
    let stored = repo
        .create(CreateShipmentInput::from_quote(
            user.user_id(),
            &shipment,
            &cost,
        ))
        .await?;

    info!(
        shipment_id = %stored.id,
        user_id = %user.user_id(),
        role = user.role(),
        total_cost = cost.total_cost,
        "shipment booked"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedShipment {
            shipment: stored,
            cost_calculation: cost,
        }),
    ))
}

/// GET /shipments - newest first, paginated.
async fn list_shipments(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<PageResponse<shipments::Model>>, ApiError> {
    let Query(page) = query?;
    let page = page.normalized();

    let repo = ShipmentRepository::new((*state.db).clone());
    let (items, total) = repo.list(&page).await?;

    Ok(Json(PageResponse::new(items, page.page, page.per_page, total)))
}

/// GET /shipments/{id}
async fn get_shipment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<shipments::Model>, ApiError> {
    let Path(id) = id?;
    let repo = ShipmentRepository::new((*state.db).clone());

    repo.find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// PUT /shipments/{id} - partial update; the stored quote is not recomputed.
async fn update_shipment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ShipmentPatch>, JsonRejection>,
) -> Result<Json<shipments::Model>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let patch = patch.validate()?;

    let repo = ShipmentRepository::new((*state.db).clone());
    let updated = repo.update(id, patch).await?.ok_or_else(not_found)?;

    info!(shipment_id = %id, "shipment updated");
    Ok(Json(updated))
}

/// DELETE /shipments/{id}
async fn delete_shipment(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let repo = ShipmentRepository::new((*state.db).clone());

    if repo.delete(id).await? {
        info!(shipment_id = %id, "shipment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

/// GET /shipments/distance-duration?pickupAddress=..&dropAddress=..
async fn distance_duration(
    State(state): State<AppState>,
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<TravelMeasure>, ApiError> {
    let Query(query) = query?;
    let (Some(pickup), Some(drop)) = (
        query.pickup_address.filter(|a| !a.trim().is_empty()),
        query.drop_address.filter(|a| !a.trim().is_empty()),
    ) else {
        return Err(ApiError(AppError::Validation(
            "Pickup and drop addresses are required".into(),
        )));
    };

    let measure = state
        .quotes
        .measure(&Location::new(pickup), &Location::new(drop))
        .await?;
    Ok(Json(measure))
}

fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Shipment not found".into()))
}
