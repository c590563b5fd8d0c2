#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders the uniform `{ "success": false, "error": ... }`
/// body the browser client expects.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Interview (or other owned resource) absent or owned by someone else.
    /// The two cases are deliberately indistinguishable to the caller.
    #[error("Not found: {0}")]
    NotFoundOrForbidden(String),

    /// Non-success response from the external AI provider. Carries the
    /// provider's error body verbatim.
    #[error("Upstream AI error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Transcription returned no text")]
    EmptyTranscript,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFoundOrForbidden(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream { status, body } => {
                tracing::error!("Upstream AI error {status}: {body}");
                (StatusCode::BAD_GATEWAY, format!("AI provider error: {body}"))
            }
            AppError::EmptyTranscript => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Transcription returned no text".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        let cases = [
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AppError::BadRequest("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFoundOrForbidden("Interview not found".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Upstream {
                    status: 500,
                    body: "overloaded".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::EmptyTranscript, StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn not_found_and_forbidden_render_identically() {
        // Ownership violations must not be distinguishable from absence.
        let absent = AppError::NotFoundOrForbidden("Interview not found".into());
        let foreign = AppError::NotFoundOrForbidden("Interview not found".into());
        assert_eq!(
            absent.into_response().status(),
            foreign.into_response().status()
        );
    }
}
