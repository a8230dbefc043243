//! Export command implementation
//!
//! The default form of the CLI: resolves credentials and base URL, builds the
//! REST client and runs one export into `LOCATION`.

use crate::adapters::stormpath::StormpathClient;
use crate::config::{resolve_credentials, CredentialStore, Settings};
use crate::core::export::{ExportCoordinator, ExportLayout, ExportSummary};
use crate::domain::ResourceKind;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for an export run
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Directory to write the export into [default: ./stormpath-exports]
    pub location: Option<PathBuf>,

    /// API key id
    #[arg(long, env = "STORMPATH_API_KEY_ID")]
    pub id: Option<String>,

    /// API key secret
    #[arg(long, env = "STORMPATH_API_KEY_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Base URL of the REST API, for Enterprise or private deployments
    #[arg(long, env = "STORMPATH_BASE_URL")]
    pub base_url: Option<String>,

    /// Export only these kinds (comma-separated, e.g. applications,accounts)
    #[arg(long, value_name = "KINDS")]
    pub only: Option<String>,
}

impl ExportArgs {
    /// Execute the export against the default credential store
    pub async fn execute(&self, settings: &Settings) -> anyhow::Result<i32> {
        let store = match CredentialStore::at_default_location() {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "Could not locate credential store");
                eprintln!("{e}");
                return Ok(1);
            }
        };
        self.execute_with(settings, &store).await
    }

    /// Execute the export, reading stored credentials from `store`
    ///
    /// Returns the process exit code: 0 on success, 1 when no credentials
    /// resolve or configuration is invalid, 2 when any resource or kind
    /// failed, 5 when the run was aborted.
    pub async fn execute_with(
        &self,
        settings: &Settings,
        store: &CredentialStore,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let resolved = match resolve_credentials(self.id.as_deref(), self.secret.as_deref(), store)
        {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                tracing::error!(path = %store.path().display(), "No API credentials found");
                eprintln!("No API credentials found.");
                eprintln!("  Pass --id and --secret, set STORMPATH_API_KEY_ID and STORMPATH_API_KEY_SECRET,");
                eprintln!("  or run `stormpath-export configure`.");
                return Ok(1);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve credentials");
                eprintln!("{e}");
                return Ok(1);
            }
        };

        let mut client_config = settings.client.clone();
        if let Some(base_url) = self.base_url.clone().or(resolved.stored_base_url) {
            tracing::info!(base_url = %base_url, "Overriding base URL");
            client_config.base_url = base_url;
        }
        if let Err(e) = client_config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(1);
        }

        let kinds = match self.selected_kinds(settings) {
            Ok(kinds) => kinds,
            Err(e) => {
                tracing::error!(error = %e, "Invalid kind selection");
                eprintln!("{e}");
                return Ok(1);
            }
        };

        let root = self.root(settings);

        let client = match StormpathClient::new(&client_config, resolved.credentials) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(1);
            }
        };

        let mut coordinator = ExportCoordinator::new(Arc::new(client), root);
        if let Some(kinds) = kinds {
            coordinator = coordinator.with_kinds(&kinds);
        }

        println!("🚀 Exporting tenant from {}", client_config.base_url);
        println!("   into {}", coordinator.root().display());
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        summary.log_summary();
        print_summary(&summary);

        if summary.is_successful() {
            println!("✅ Export completed successfully!");
            Ok(0)
        } else {
            println!("⚠️  Export completed with failures");
            Ok(2)
        }
    }

    /// `--only` wins over the settings file; `None` means every kind
    fn selected_kinds(&self, settings: &Settings) -> crate::domain::Result<Option<Vec<ResourceKind>>> {
        match &self.only {
            Some(only) => ResourceKind::parse_selection(only).map(Some),
            None => settings.export.selected_kinds(),
        }
    }

    fn root(&self, settings: &Settings) -> PathBuf {
        self.location
            .clone()
            .or_else(|| settings.export.location.as_ref().map(PathBuf::from))
            .unwrap_or_else(ExportLayout::default_root)
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!(
        "  Tenant: {}",
        summary.tenant_id.as_deref().unwrap_or("unknown")
    );
    for kind in &summary.kinds {
        let note = if kind.aborted { " (aborted)" } else { "" };
        println!(
            "  {:<14} exported {:>6}, failed {:>4}{note}",
            kind.kind.as_str(),
            kind.exported,
            kind.failed
        );
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.failures.is_empty() {
        println!("⚠️  Errors encountered:");
        for failure in summary.failures.iter().take(10) {
            println!("  - {:?}: {}", failure.failure_type, failure.message);
            if let Some(context) = &failure.context {
                println!("    Context: {context}");
            }
        }
        if summary.failures.len() > 10 {
            println!("  ... and {} more", summary.failures.len() - 10);
        }
        println!();
    }
}
