//! HTTP boundary errors

use crate::types::{ErrorDetail, ErrorResponse, FieldError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Failure of a single request. Never affects other requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body failed schema validation; the model was not invoked
    #[error("request validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// The classifier failed on a validated input
    #[error("inference failed: {0:#}")]
    Inference(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "content_type",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            _ => "body_invalid",
        };
        ApiError::Validation(vec![FieldError::body(kind, rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Validation(errors) => {
                warn!(errors = errors.len(), "Rejected prediction request");
                ErrorDetail::Fields(errors)
            }
            ApiError::Inference(e) => {
                error!(error = format!("{e:#}"), "Inference failed");
                ErrorDetail::Message("Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
