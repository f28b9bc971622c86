use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{flag} {reason}")]
    InvalidInput { flag: &'static str, reason: String },

    #[error("Invalid API JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn invalid(flag: &'static str, reason: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            flag,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        super::json_response(StatusCode::BAD_REQUEST, body)
    }
}
