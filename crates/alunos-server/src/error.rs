// ABOUTME: Error type returned by the student API handlers.
// ABOUTME: Maps validation, not-found, and storage failures to status codes with an error body.

use alunos_core::ValidationError;
use alunos_store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A field failed validation; the message is the field's fixed text.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be read as a JSON object.
    #[error("{0}")]
    BadRequest(String),

    #[error("Student not found")]
    NotFound,

    /// Any storage fault, constraint violations included. The raw storage
    /// message is passed through to the client.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The blocking task running a store call failed to complete.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => tracing::error!("storage fault: {}", e),
            ApiError::Internal(msg) => tracing::error!("store task failed: {}", msg),
            ApiError::Validation(e) => tracing::debug!(field = ?e.field, "rejected input"),
            ApiError::BadRequest(msg) => tracing::debug!("malformed request body: {}", msg),
            ApiError::NotFound => {}
        }

        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alunos_core::{Field, StudentInput};
    use alunos_store::StudentStore;

    #[test]
    fn status_codes_follow_error_tier() {
        let validation = ApiError::from(ValidationError::from(Field::Email));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), Field::Email.message());

        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.to_string(), "Student not found");
    }

    #[test]
    fn storage_fault_keeps_raw_message() {
        let store = StudentStore::open_in_memory().unwrap();
        let student = StudentInput {
            name: Some("Ana Silva".to_string()),
            birth_date: Some("2000-05-10".to_string()),
            enrollment_code: Some("ABC123".to_string()),
            status: Some("ATIVO".to_string()),
            email: Some("ana@x.com".to_string()),
        }
        .validate()
        .unwrap();
        store.insert(&student).unwrap();

        let err = ApiError::from(store.insert(&student).unwrap_err());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            err.to_string().starts_with("UNIQUE constraint failed"),
            "got: {err}"
        );
    }
}
