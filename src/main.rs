use clap::Parser;
use std::process;
use stormpath_export::cli::{Cli, Commands};
use stormpath_export::config::load_settings;
use stormpath_export::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match load_settings(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings from {}: {e}", cli.config);
            process::exit(1);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    let guard = match init_logging(&log_level, &settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "stormpath-export");

    let exit_code = match execute_command(&cli, &settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file writer first.
    drop(guard);
    process::exit(exit_code);
}

async fn execute_command(
    cli: &Cli,
    settings: &stormpath_export::config::Settings,
) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Configure(args)) => args.execute().await,
        None => cli.export.execute(settings).await,
    }
}
