use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Unique constraints are named the PostgreSQL way
/// (`{table}_{col1}_{col2}_key`), which lets us report which record clashed
/// without parsing the server message.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "record".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let entity = info.table_name().unwrap_or("record").to_string();
                let field = info
                    .constraint_name()
                    .and_then(|name| Self::constrained_columns(name, &entity))
                    .unwrap_or_else(|| "key".to_string());
                AppError::Duplicate {
                    entity,
                    field,
                    value: info.details().unwrap_or("").to_string(),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => AppError::NotFound {
                entity: info.table_name().unwrap_or("record").to_string(),
                field: info.constraint_name().unwrap_or("reference").to_string(),
                value: info.details().unwrap_or("").to_string(),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(info.message().to_string()),
            },
        }
    }

    /// Extracts `col1_col2` from a `{table}_col1_col2_key` constraint name.
    fn constrained_columns(constraint: &str, table: &str) -> Option<String> {
        constraint
            .strip_prefix(table)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix("_key"))
            .map(str::to_string)
    }
}
