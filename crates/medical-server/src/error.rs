//! HTTP error translation.
//!
//! Every failure leaves the API as a JSON body of the form
//! `{"timestamp", "status", "error", "message"}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medical_core::{ServiceError, ValidationErrors};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Status code and short error label.
    pub fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Service(err) => match err.not_found_label() {
                Some(label) => (StatusCode::NOT_FOUND, label),
                None => match err {
                    ServiceError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
                    ServiceError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
                },
            },
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Failed"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "timestamp": chrono::Local::now().naive_local(),
            "status": status.as_u16(),
            "error": label,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
