use clap::Parser;

use novel_front::cli::{Cli, execute_command, init_logger_from_settings, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    let _log_handle = init_logger_from_settings(&cli, &settings)?;

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
