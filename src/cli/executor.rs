//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Runs the parsed command with already loaded settings.
///
/// No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings).execute(*dry_run).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/novel".to_string();
        config.jwt.secret = "x".repeat(48);
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["novel-front", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, create_valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_rejects_privileged_wildcard_bind() {
        let cli = Cli::try_parse_from([
            "novel-front",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "80",
            "--dry-run",
        ])
        .unwrap();

        match execute_command(&cli, create_valid_config()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_migrate_checks_database_config() {
        let cli = Cli::try_parse_from(["novel-front", "migrate", "--dry-run"]).unwrap();
        let mut config = create_valid_config();
        config.database.url = String::new();

        assert!(matches!(
            execute_command(&cli, config).await,
            Err(AppError::Configuration { .. })
        ));
    }
}
