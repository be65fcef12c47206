use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failures of a single shared config lookup. Display strings are the
/// fixed, client-facing messages.
#[derive(Debug, Error)]
pub enum SharedConfigError {
    #[error("Weaviate credentials are not configured")]
    Configuration,

    #[error("Failed to query Weaviate")]
    UpstreamUnavailable(#[source] TransportError),

    #[error("Invalid response from Weaviate")]
    UpstreamInvalidResponse,

    #[error("Weaviate returned errors")]
    UpstreamQueryError,

    #[error("Shared default config not found")]
    NotFound,
}

impl SharedConfigError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SharedConfigError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            SharedConfigError::UpstreamUnavailable(_)
            | SharedConfigError::UpstreamInvalidResponse
            | SharedConfigError::UpstreamQueryError => StatusCode::BAD_GATEWAY,
            SharedConfigError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Error raised by a [`crate::graphql::GraphqlTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for SharedConfigError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
