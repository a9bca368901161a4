//! JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use freightdesk_core::quote::QuoteError;
use freightdesk_core::shipment::ShipmentError;
use freightdesk_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{ "error": CODE, "message": TEXT }`.
///
/// Retryable upstream failures also carry `"retryable": true`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// The wrapped application error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self(err.into())
    }
}

impl From<ShipmentError> for ApiError {
    fn from(err: ShipmentError) -> Self {
        Self(err.into())
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

// Malformed bodies, query strings and path parameters are validation failures.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &err {
            AppError::Database(_) | AppError::Internal(_) => {
                error!(error = %err, "request failed");
                "An internal error occurred".to_string()
            }
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::RouteNotFound(msg)
            | AppError::ExternalService(msg) => msg.clone(),
        };

        let body = if err.is_retryable() {
            json!({ "error": err.error_code(), "message": message, "retryable": true })
        } else {
            json!({ "error": err.error_code(), "message": message })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(AppError::Validation("weight must be greater than zero".into()), 400, "VALIDATION_ERROR")]
    #[case(AppError::RouteNotFound("ZERO_RESULTS".into()), 422, "ROUTE_NOT_FOUND")]
    #[case(AppError::NotFound("Shipment not found".into()), 404, "NOT_FOUND")]
    #[tokio::test]
    async fn test_client_errors_keep_message(
        #[case] err: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        let message = err.to_string();
        let (actual, body) = render(err).await;

        assert_eq!(actual.as_u16(), status);
        assert_eq!(body["error"], code);
        assert!(message.contains(body["message"].as_str().unwrap()));
        assert!(body.get("retryable").is_none());
    }

    #[tokio::test]
    async fn test_provider_errors_are_marked_retryable() {
        let (status, body) = render(AppError::ExternalService("OVER_QUERY_LIMIT".into())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["retryable"], true);
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) = render(AppError::Database("password=hunter2".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
    }
}
