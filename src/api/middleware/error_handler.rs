//! Renders every error as a response envelope.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::Envelope;
use crate::error::{AppError, ResponseStatus};

/// HTTP status an error is sent with.
///
/// Business rejections and token problems are ordinary outcomes for the
/// front-end, so they travel as 200 with a non-`OK` envelope status.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Status(_) | AppError::Unauthorized { .. } => StatusCode::OK,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = error_to_status_code(&self);
        let status = self.status();

        let body = match &self {
            AppError::Status(s) => Envelope::<()>::fail(*s).into_response(),
            AppError::Unauthorized { message } => {
                tracing::debug!(reason = %message, "Rejected unauthenticated request");
                Envelope::<()>::fail(status).into_response()
            }
            AppError::ValidationErrors { errors } => {
                let message = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                Envelope::<()>::fail_with(status, message).into_response()
            }
            AppError::Validation { field, reason } => {
                Envelope::<()>::fail_with(status, format!("{}: {}", field, reason)).into_response()
            }
            AppError::BadRequest { message } => {
                Envelope::<()>::fail_with(status, message.clone()).into_response()
            }
            AppError::NotFound { .. } | AppError::Duplicate { .. } => {
                Envelope::<()>::fail_with(status, self.to_string()).into_response()
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Database connection unavailable");
                Envelope::<()>::fail_with(status, "Database connection unavailable").into_response()
            }
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "Database operation failed");
                Envelope::<()>::fail(ResponseStatus::Error).into_response()
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "Configuration error");
                Envelope::<()>::fail(ResponseStatus::Error).into_response()
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                Envelope::<()>::fail(ResponseStatus::Error).into_response()
            }
        };

        let (mut parts, body) = body.into_parts();
        parts.status = status_code;
        Response::from_parts(parts, body)
    }
}

/// Wraps plain-text error responses produced outside the handlers
/// (unknown routes, wrong methods) in an envelope.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status_code = response.status();

    if !(status_code.is_client_error() || status_code.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        return response;
    }

    let (status, default_message) = match status_code {
        StatusCode::NOT_FOUND => (ResponseStatus::NotFound, "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            (ResponseStatus::ParamError, "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => (ResponseStatus::ParamError, "Unsupported media type"),
        code if code.is_client_error() => (ResponseStatus::ParamError, "Bad request"),
        _ => (ResponseStatus::Error, ResponseStatus::Error.message()),
    };

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap_or_default();
    let original = String::from_utf8_lossy(&body).trim().to_string();
    let message = if original.is_empty() || status == ResponseStatus::Error {
        default_message.to_string()
    } else {
        original
    };

    (status_code, Envelope::<()>::fail_with(status, message)).into_response()
}
