//! API error types and responses

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorResponse, PaymailError};
use crate::services::ResolutionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("request did not complete within {0:?}")]
    RequestTimeout(std::time::Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Resolution(err) => match err {
                ResolutionError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
                ResolutionError::UnknownDomain(_)
                | ResolutionError::UnknownAlias(_)
                | ResolutionError::NoDestination(_) => StatusCode::NOT_FOUND,
                ResolutionError::ResolverUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Resolution(err) => match err {
                ResolutionError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
                ResolutionError::UnknownDomain(_) => "UNKNOWN_DOMAIN",
                ResolutionError::UnknownAlias(_) => "UNKNOWN_ALIAS",
                ResolutionError::NoDestination(_) => "NO_DESTINATION",
                ResolutionError::ResolverUnavailable(_) => "RESOLVER_UNAVAILABLE",
            },
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::RequestTimeout(_) => "REQUEST_TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<PaymailError> for ApiError {
    fn from(err: PaymailError) -> Self {
        ApiError::Resolution(ResolutionError::InvalidIdentifier(err.to_string()))
    }
}

/// An undecodable path segment (e.g. invalid UTF-8) never names a handle.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        if rejection.status().is_server_error() {
            return ApiError::Internal(rejection.body_text());
        }
        ApiError::Resolution(ResolutionError::InvalidIdentifier(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
