//! Mapping of domain and storage errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TodoError;

/// Errors a handler can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted input was refused; the client should show `errors`
    /// next to `input`.
    #[error("{}", .errors.join(" "))]
    Rejected {
        errors: Vec<String>,
        input: Option<String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Attach the submitted title to a rejection so it can be redisplayed.
    pub fn with_input(self, submitted: &str) -> Self {
        match self {
            Self::Rejected { errors, .. } => Self::Rejected {
                errors,
                input: Some(submitted.to_string()),
            },
            other => other,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound { .. } => Self::NotFound(err.to_string()),
            TodoError::Validation(_) | TodoError::DuplicateTitle { .. } => Self::Rejected {
                errors: vec![err.to_string()],
                input: None,
            },
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Rejected { errors, input } => {
                tracing::debug!(?errors, "Rejected input");
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse { errors, input })
            }
            Self::NotFound(message) => {
                tracing::warn!("Not found: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        errors: vec![message],
                        input: None,
                    },
                )
            }
            Self::Internal(e) => {
                // Full error stays in the logs; clients get a generic message.
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        errors: vec!["Internal server error".to_string()],
                        input: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
