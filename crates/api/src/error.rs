use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use persistence::StoreError;
use shared::error::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Malformed id")]
    MalformedId,

    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(String),
}

impl ApiError {
    /// Single-field validation failure.
    pub fn invalid(field: &str, message: &str) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Validation(errors) => {
                let message = match errors.as_slice() {
                    [only] => only.message.clone(),
                    many => format!("{} validation errors", many.len()),
                };
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    message,
                    Some(errors),
                )
            }
            ApiError::MalformedId => (
                StatusCode::BAD_REQUEST,
                "malformed_id",
                "id must be a valid UUID".into(),
                None,
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Disaster not found".into(),
                None,
            ),
            ApiError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => {
                ApiError::Validation(vec![FieldError::new("body", msg)])
            }
            StoreError::Database(e) => ApiError::Store(e.to_string()),
        }
    }
}
