use thiserror::Error;

/// Why settings could not be loaded.
///
/// `AppError` turns these into `Configuration` errors keyed by `field`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` or the `--config` file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value is out of range, e.g. `field = "jwt.secret"`
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// `NOVEL_APP_ENV` names no known environment
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `NOVEL_CONFIG_DIR` and `NOVEL_CONFIG_FILE` both set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_the_field() {
        let error = ConfigError::validation("jwt.secret", "JWT secret cannot be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: jwt.secret - JWT secret cannot be empty"
        );
    }
}
