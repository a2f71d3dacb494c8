use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::ErrorResponse;
use crate::store::StoreError;

/// Errors surfaced to HTTP clients.
///
/// Messages are fixed strings or router-authored text; store error details
/// are logged, never echoed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Malformed recipe payload")]
    MalformedBody,

    #[error("Recipe not found")]
    NotFound,

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Recipe store unavailable")]
    Unavailable,

    #[error("Internal server error")]
    Internal,

    /// The request could not be read at all; carries the extractor's status.
    #[error("{1}")]
    Unreadable(StatusCode, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unavailable | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unreadable(status, _) => *status,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => ApiError::Unavailable,
            StoreError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            StoreError::Query(_) => ApiError::Internal,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected request path: {}", rejection.body_text());
        ApiError::InvalidArgument("Invalid request path".to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "Request body too large"
        } else {
            "Failed to read request body"
        };
        ApiError::Unreadable(status, message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_hide_details() {
        let err = ApiError::from(StoreError::Query(diesel::result::Error::NotFound));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");

        let err = ApiError::from(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Recipe store unavailable");
    }

    #[test]
    fn test_invalid_argument_is_bad_request() {
        let err = ApiError::from(StoreError::InvalidArgument("Invalid recipe id: x".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid recipe id: x");
    }

    #[test]
    fn test_unreadable_keeps_status() {
        let err = ApiError::Unreadable(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large".to_string(),
        );
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "Request body too large");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.to_string(), "Recipe not found");
    }
}
