//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl turns
//! the error into `(status, {"error": message})`. Storage failures carry a
//! fixed per-operation message for the client, and their cause is logged
//! here rather than sent over the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::model::{InvalidTodoId, ValidationError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error(transparent)]
    InvalidId(#[from] InvalidTodoId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Todo not found")]
    TodoNotFound,

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Wrap a store failure with the message the client should see.
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody | ApiError::InvalidId(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TodoNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { message, source } = &self {
            error!(error = %source, "{message}");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(ApiError::InvalidBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(InvalidTodoId).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::EmptyBody).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn messages_match_the_wire_contract() {
        assert_eq!(ApiError::from(InvalidTodoId).to_string(), "Invalid todo ID");
        assert_eq!(
            ApiError::from(ValidationError::EmptyBody).to_string(),
            "Todo body is required"
        );
        assert_eq!(ApiError::TodoNotFound.to_string(), "Todo not found");
    }

    #[test]
    fn storage_errors_hide_their_cause() {
        let err = ApiError::storage("Failed to fetch todos")(StoreError::Timeout(
            Duration::from_secs(10),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch todos");
    }
}
