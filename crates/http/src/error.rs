//! Error handling for the libris HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types that map to HTTP responses.
///
/// Handlers return these; the `IntoResponse` impl below is the single
/// place an error becomes a status code and body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed with {} violation(s)", violations.len())]
    Validation { violations: Vec<String> },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a validation error from schema violation messages
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation { violations }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation { violations } => (StatusCode::BAD_REQUEST, json!(violations)),
            ApiError::NotFound { message } => (StatusCode::NOT_FOUND, json!(message)),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed with internal error");

                // Hide internal details outside debug builds.
                let message = if cfg!(debug_assertions) {
                    err.to_string()
                } else {
                    "An internal server error occurred".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, json!(message))
            }
        };

        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), "request rejected");
        }

        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_maps_to_400_with_message_list() {
        let error = ApiError::validation(vec!["instance requires property \"year\"".to_string()]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": {
                    "message": ["instance requires property \"year\""],
                    "status": 400,
                }
            })
        );
    }

    #[tokio::test]
    async fn not_found_error_maps_to_404_with_single_message() {
        let error = ApiError::not_found("There is no book with an isbn '1111111111'");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": {
                    "message": "There is no book with an isbn '1111111111'",
                    "status": 404,
                }
            })
        );
    }

    #[tokio::test]
    async fn internal_error_maps_to_500() {
        let error = ApiError::Internal(anyhow::anyhow!("database connection failed"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["status"], 500);
    }
}
