//! The `{status, code, message?, data?}` wrapper every endpoint answers with.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ResponseStatus;

/// Uniform response body.
///
/// `data` is only present on success, and a failure always carries a
/// non-`OK` status.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Success carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            code: ResponseStatus::Ok.code(),
            message: Some(ResponseStatus::Ok.message().to_string()),
            data: Some(data),
        }
    }

    /// Failure with the status tag's default message.
    pub fn fail(status: ResponseStatus) -> Self {
        Self::fail_with(status, status.message())
    }

    pub fn fail_with(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            code: status.code(),
            message: Some(message.into()),
            data: None,
        }
    }

    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            status: ResponseStatus::Ok,
            code: ResponseStatus::Ok.code(),
            message: Some(ResponseStatus::Ok.message().to_string()),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
