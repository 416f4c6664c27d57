//! Application error handling
//!
//! This module provides unified error handling for the API, converting
//! internal errors to appropriate HTTP responses. Body shape is always
//! `{ "error": <message> }`; internal detail is logged, never leaked.

use crate::generation::GenerationError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request body: bad JSON, wrong content type, oversized
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logically inconsistent profile caught after sanitization
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client exceeded the fixed request window
    #[error("Rate limited")]
    RateLimited { retry_after_secs: u64 },

    /// The external generation call failed; never the caller's fault
    #[error("Generation failed")]
    Generation(#[from] GenerationError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, retry_after) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!(
                    "Too many requests. Please try again in {} seconds.",
                    retry_after_secs
                ),
                Some(*retry_after_secs),
            ),
            ApiError::Generation(err) => {
                error!("Generation error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Program generation failed. Please try again.".to_string(),
                    None,
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred. Please try again.".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            retry_after_secs: retry_after,
        });

        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Target weight should be less than current weight".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("Invalid request body".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let error = ApiError::RateLimited {
            retry_after_secs: 42,
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &HeaderValue::from_static("42")
        );
    }

    #[test]
    fn test_generation_error_is_opaque() {
        let error = ApiError::Generation(GenerationError::UnexpectedResponse(
            "secret upstream detail".into(),
        ));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
