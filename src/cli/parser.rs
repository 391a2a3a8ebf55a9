//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Reader-facing REST service of the novel site
#[derive(Parser, Debug)]
#[command(name = "novel-front")]
#[command(about = "Reader account REST service for the novel site")]
#[command(long_about = "
novel-front serves the /user endpoints of the novel site: login and
registration, bookshelf, reading history, feedback, profile and chapter
purchases.

EXAMPLES:
    # Start the server with default configuration
    novel-front serve

    # Start server on custom host and port
    novel-front serve --host 0.0.0.0 --port 8085

    # Use custom configuration file
    novel-front --config /path/to/config.toml serve

    # Check configuration without starting server
    novel-front serve --dry-run

    # Run database migrations
    novel-front migrate

    # Preview pending migrations
    novel-front migrate --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to run, `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single configuration file, replaces the layered `config/` directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Deployment environment, overrides NOVEL_APP_ENV
    #[arg(short, long, value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind, overrides server.host
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port to bind, overrides server.port
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level, wins over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentArg {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) = &self.command
            && host == "0.0.0.0"
            && *port < 1024
        {
            return Err(
                "Binding to 0.0.0.0 on a privileged port (< 1024) typically requires root privileges"
                    .to_string(),
            );
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    /// Log level requested on the command line, if any.
    ///
    /// `serve --log-level` wins over `--verbose` and `--quiet`.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if let Some(Commands::Serve {
            log_level: Some(level),
            ..
        }) = &self.command
        {
            return Some(level.as_str());
        }
        if self.verbose {
            Some(LogLevel::Debug.as_str())
        } else if self.quiet {
            Some(LogLevel::Error.as_str())
        } else {
            None
        }
    }
}

impl From<EnvironmentArg> for crate::config::Environment {
    fn from(env: EnvironmentArg) -> Self {
        match env {
            EnvironmentArg::Development => crate::config::Environment::Development,
            EnvironmentArg::Test => crate::config::Environment::Test,
            EnvironmentArg::Staging => crate::config::Environment::Staging,
            EnvironmentArg::Production => crate::config::Environment::Production,
        }
    }
}
