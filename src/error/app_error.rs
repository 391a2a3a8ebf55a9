use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use diesel_async::pooled_connection::PoolError;
use serde::Serialize;
use thiserror::Error;

use crate::cache::CacheError;
use crate::config::error::ConfigError;
use crate::error::{DatabaseErrorConverter, ResponseStatus};

/// A single field that failed request validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Every variant renders as a response envelope, see
/// `api::middleware::error_handler` for the status mapping.
#[derive(Error, Debug)]
pub enum AppError {
    /// A business rule rejected the request with a well-known status tag
    #[error("Request rejected: {0}")]
    Status(ResponseStatus),

    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Validation errors for several fields at once
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing, malformed or expired session token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// The envelope status this error is reported with.
    pub fn status(&self) -> ResponseStatus {
        match self {
            AppError::Status(status) => *status,
            AppError::Unauthorized { .. } => ResponseStatus::NotLoggedIn,
            AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::BadRequest { .. } => ResponseStatus::ParamError,
            AppError::NotFound { .. } => ResponseStatus::NotFound,
            AppError::Duplicate { .. }
            | AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Internal { .. } => ResponseStatus::Error,
        }
    }
}

impl From<ResponseStatus> for AppError {
    fn from(status: ResponseStatus) -> Self {
        AppError::Status(status)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("Failed to acquire database connection: {}", error),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(error: CacheError) -> Self {
        AppError::Internal {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 0, max = 1))]
        sex: u8,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Status(ResponseStatus::VelCodeError).status(),
            ResponseStatus::VelCodeError
        );
        assert_eq!(
            AppError::Unauthorized {
                message: "missing".to_string()
            }
            .status(),
            ResponseStatus::NotLoggedIn
        );
        assert_eq!(
            AppError::BadRequest {
                message: "x".to_string()
            }
            .status(),
            ResponseStatus::ParamError
        );
        assert_eq!(
            AppError::Internal {
                source: anyhow::anyhow!("boom")
            }
            .status(),
            ResponseStatus::Error
        );
    }

    #[test]
    fn test_from_validation_errors_collects_all_fields() {
        let sample = Sample {
            name: "ab".to_string(),
            sex: 3,
        };
        let err: AppError = sample.validate().unwrap_err().into();
        match err {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "too short");
                assert_eq!(errors[1].field, "sex");
                assert!(errors[1].message.contains("range"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_status() {
        let err: AppError = ResponseStatus::UserNoBalance.into();
        assert!(matches!(err, AppError::Status(ResponseStatus::UserNoBalance)));
    }

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
