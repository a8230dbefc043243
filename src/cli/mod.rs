//! CLI interface and argument parsing
//!
//! Running without a subcommand exports the tenant:
//!
//! ```text
//! stormpath-export [LOCATION] [--id ID --secret SECRET] [--base-url URL] [--only KINDS]
//! stormpath-export configure [--force]
//! ```

pub mod commands;

use clap::{Parser, Subcommand};

/// Stormpath Export - back up a Stormpath tenant as JSON files
#[derive(Parser, Debug)]
#[command(name = "stormpath-export")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to settings file
    #[arg(
        short,
        long,
        default_value = "stormpath-export.toml",
        env = "STORMPATH_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STORMPATH_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute; exports when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub export: commands::export::ExportArgs,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store API credentials in ~/.stormpath/stormpath-export.json
    Configure(commands::configure::ConfigureArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_default_export() {
        let cli = Cli::parse_from(["stormpath-export"]);
        assert_eq!(cli.config, "stormpath-export.toml");
        assert!(cli.command.is_none());
        assert!(cli.export.location.is_none());
    }

    #[test]
    fn test_cli_parse_location_and_flags() {
        let cli = Cli::parse_from([
            "stormpath-export",
            "/tmp/out",
            "--id",
            "KEYID",
            "--secret",
            "KEYSECRET",
            "--base-url",
            "https://enterprise.stormpath.io/v1",
            "--only",
            "applications,accounts",
        ]);
        assert!(cli.command.is_none());
        assert_eq!(cli.export.location, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.export.id.as_deref(), Some("KEYID"));
        assert_eq!(cli.export.secret.as_deref(), Some("KEYSECRET"));
        assert_eq!(
            cli.export.base_url.as_deref(),
            Some("https://enterprise.stormpath.io/v1")
        );
        assert_eq!(cli.export.only.as_deref(), Some("applications,accounts"));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["stormpath-export", "--config", "custom.toml"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["stormpath-export", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_configure() {
        let cli = Cli::parse_from(["stormpath-export", "configure", "--force"]);
        match cli.command {
            Some(Commands::Configure(args)) => assert!(args.force),
            other => panic!("expected configure, got {other:?}"),
        }
    }
}
