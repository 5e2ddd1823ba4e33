//! HTTP error mapping
//!
//! Every failure leaves the service as the `{status: "error", message}` JSON
//! envelope. Validation and not-found outcomes are ordinary answers and go out
//! with 200 so the page script can show the message; anything unexpected is
//! logged in full and reported to the caller only as "Internal server error".

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::core::{LookupError, StoreError};

/// Message returned for any internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// JSON envelope shared by all API routes
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Case not found in database")]
    NotFound,

    #[error("Case type is required")]
    MissingCaseType,

    #[error("No cases found for this type")]
    NoCasesForType,

    #[error("Request did not complete within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingFields => ApiError::MissingFields,
            LookupError::NotFound => ApiError::NotFound,
            LookupError::Store(err) => ApiError::Store(err),
        }
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::NotFound => StatusCode::OK,
            ApiError::MissingCaseType => StatusCode::BAD_REQUEST,
            ApiError::NoCasesForType => StatusCode::NOT_FOUND,
            ApiError::Timeout(_) | ApiError::Store(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::error("Missing required fields")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "error", "message": "Missing required fields"})
        );
    }

    #[test]
    fn test_success_envelope_omits_message() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({"status": "success", "data": [1, 2]}));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::OK);
        assert_eq!(ApiError::MissingFields.status_code(), StatusCode::OK);
        assert_eq!(ApiError::MissingCaseType.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoCasesForType.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Store(StoreError::MissingTable).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
