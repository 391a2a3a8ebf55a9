//! Command-line interface: argument parsing, settings loading and
//! dispatch to the `serve` and `migrate` handlers.

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, EnvironmentArg, LogLevel};

use crate::config::ConfigLoader;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Loads layered settings and applies `serve --host/--port` on top.
///
/// The result is validated again after the overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = ConfigLoader::new()?
        .with_overrides(cli.config.clone(), cli.env.map(Into::into))
        .load()?;

    if let Some(Commands::Serve { host, port, .. }) = &cli.command {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
        settings.validate()?;
    }

    Ok(settings)
}

/// Initializes tracing from the logger section, then applies the command
/// line level override.
pub fn init_logger_from_settings(
    cli: &Cli,
    settings: &Settings,
) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    let handle = init_logger(logger_config)?;

    if let Some(level) = cli.log_level_override() {
        handle.set_level(level)?;
    }

    Ok(handle)
}
