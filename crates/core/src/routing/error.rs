//! Route resolution error types.

use thiserror::Error;

/// Route resolution errors.
///
/// `Provider` failures are transient and may be retried by the caller;
/// the other kinds are not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Input rejected before any provider call.
    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    /// Provider answered, but there is no usable route.
    #[error("no route found: {0}")]
    RouteNotFound(String),

    /// Transport, auth, quota, or timeout failure talking to the provider.
    #[error("routing provider error: {0}")]
    Provider(String),
}

impl RouteError {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a route not found error.
    #[must_use]
    pub fn route_not_found(msg: impl Into<String>) -> Self {
        Self::RouteNotFound(msg.into())
    }

    /// Create a provider error.
    #[must_use]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Whether retrying the same call later could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Provider(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::Provider(format!("malformed provider response: {err}"))
        } else {
            Self::Provider(err.to_string())
        }
    }
}
