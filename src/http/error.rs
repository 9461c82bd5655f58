//! Mapping of service failures onto HTTP responses.

use crate::task::services::TaskAccessError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::{debug, error};

/// Error returned by task handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the message placed in the response body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl From<TaskAccessError> for HttpError {
    fn from(err: TaskAccessError) -> Self {
        let status = match &err {
            TaskAccessError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            TaskAccessError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TaskAccessError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            debug!(status = %self.status, message = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
