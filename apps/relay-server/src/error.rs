use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::{SendError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the manual trigger endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input; the sender was never called.
    #[error("{0}")]
    Validation(String),
    /// The Slack call failed.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: SendError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str, source: SendError) -> Self {
        ApiError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Success body shared by the manual endpoints.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = ValidationError::MissingField("userId").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "userId is required");
    }

    #[test]
    fn upstream_keeps_context_and_cause() {
        let err = ApiError::upstream(
            "Slack message failed",
            SendError::Api {
                error: "channel_not_found".into(),
            },
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Slack message failed: channel_not_found");
    }
}
