use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;
use storage::error::StorageError;
use storage::models::preferences::validation_message;
use validator::ValidationErrors;

/// Errors returned by the gym tracker API
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    /// Request body rejected by its `Validate` rules.
    Validation(ValidationErrors),
    /// Path user id below 1.
    InvalidUserId(i64),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::InvalidUserId(id) => write!(f, "Invalid user id: {}", id),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            // duplicate record (insert on an existing user, repeated catalog name)
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            // a value the schema CHECKs refuse
            Self::Storage(StorageError::OutOfRange(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Storage(StorageError::NotFound) => json!({ "error": "Resource not found" }),
            Self::Storage(StorageError::ConstraintViolation(msg)) => json!({ "error": msg }),
            Self::Storage(StorageError::OutOfRange(msg)) => json!({
                "error": "Validation failed",
                "details": [msg]
            }),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({ "error": "An internal error occurred" })
            }
            Self::Validation(errors) => {
                let mut details: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors
                            .iter()
                            .map(move |e| format!("{}: {}", field, validation_message(e)))
                    })
                    .collect();
                details.sort();

                json!({
                    "error": "Validation failed",
                    "details": details
                })
            }
            Self::InvalidUserId(_) => json!({ "error": "user_id must be >= 1" }),
            Self::Unauthorized => json!({ "error": "Unauthorized" }),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
