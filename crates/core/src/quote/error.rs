//! Quote error types.

use freightdesk_shared::AppError;
use thiserror::Error;

use crate::routing::RouteError;

/// Errors surfaced by [`super::QuoteService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Request rejected before any provider call.
    #[error("invalid quote request: {0}")]
    InvalidRequest(String),

    /// No drivable route between the two addresses.
    #[error("no route found: {0}")]
    RouteNotFound(String),

    /// Routing provider failed; the quote may succeed if retried.
    #[error("routing provider error: {0}")]
    Provider(String),
}

impl QuoteError {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether retrying the same quote later could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl From<RouteError> for QuoteError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            RouteError::RouteNotFound(msg) => Self::RouteNotFound(msg),
            RouteError::Provider(msg) => Self::Provider(msg),
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidRequest(msg) => Self::Validation(msg),
            QuoteError::RouteNotFound(msg) => Self::RouteNotFound(msg),
            QuoteError::Provider(msg) => Self::ExternalService(msg),
        }
    }
}
