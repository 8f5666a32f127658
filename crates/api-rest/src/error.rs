//! Error responses for the REST surface.
//!
//! Every failure, including a body that does not deserialize, is returned as a JSON
//! [`ValidationRes`] carrying one message.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use triage_core::ValidationError;

use crate::dto::ValidationRes;

/// A status code plus the single message shown to the user.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!("form rejected: {err}");
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("request body rejected: {}", rejection.body_text());
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ValidationRes {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// `axum::Json` whose rejection is an [`ApiError`] instead of a plain-text body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
