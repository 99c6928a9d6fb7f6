//! HTTP error mapping.
//!
//! Validation failures become 400, missing notes 404, everything else 500.
//! Every error body is `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use brainpad_core::{ErrorResponse, ValidationError};

/// Message returned for any missing note.
pub const NOTE_NOT_FOUND: &str = "Note not found.";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
        }
    }

    /// Log the failure for operation `op` and hand the error back.
    pub fn logged(self, op: &'static str) -> Self {
        let status = self.status().as_u16();
        if status >= 500 {
            error!(
                subsystem = "api",
                component = "notes",
                op,
                status,
                error = %self.message(),
                "Request failed"
            );
        } else {
            warn!(
                subsystem = "api",
                component = "notes",
                op,
                status,
                error = %self.message(),
                "Request rejected"
            );
        }
        self
    }
}

impl From<brainpad_core::Error> for ApiError {
    fn from(err: brainpad_core::Error) -> Self {
        match err {
            brainpad_core::Error::NoteNotFound(_) => ApiError::NotFound(NOTE_NOT_FOUND.to_string()),
            brainpad_core::Error::Validation(v) => ApiError::BadRequest(v.to_string()),
            brainpad_core::Error::Internal(msg) => ApiError::Internal(msg),
            db @ brainpad_core::Error::Database(_) => ApiError::Internal(db.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: match self {
                ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => {
                    msg
                }
            },
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainpad_core::Error;

    #[test]
    fn test_not_found_maps_to_404_with_fixed_message() {
        let err: ApiError = Error::NoteNotFound("abc".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), NOTE_NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = Error::Validation(ValidationError::NoUpdateData).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No update data provided.");
    }

    #[test]
    fn test_internal_keeps_raw_message() {
        let err: ApiError = Error::Internal("Failed to create note.".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to create note.");
    }

    #[test]
    fn test_database_failure_maps_to_500() {
        let err: ApiError = Error::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Database error: "));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::BadRequest("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
