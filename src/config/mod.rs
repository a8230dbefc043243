//! Configuration management.
//!
//! Two sources feed a run:
//!
//! - **Settings** ([`Settings`]): an optional TOML file (`stormpath-export.toml`
//!   by default) with `${VAR}` substitution, `STORMPATH_EXPORT_*` overrides and
//!   validation on load
//! - **Credentials** ([`ApiCredentials`]): inline `--id/--secret` (or their
//!   `STORMPATH_API_KEY_*` environment variables), else the per-user
//!   [`CredentialStore`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stormpath_export::config::{load_settings, resolve_credentials, CredentialStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = load_settings("stormpath-export.toml")?;
//! println!("API: {}", settings.client.base_url);
//!
//! let store = CredentialStore::at_default_location()?;
//! match resolve_credentials(None, None, &store)? {
//!     Some(resolved) => println!("Key: {}", resolved.credentials.id()),
//!     None => eprintln!("Run `stormpath-export configure` first"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example Settings
//!
//! ```toml
//! [client]
//! base_url = "https://api.stormpath.com/v1"
//! timeout_seconds = 30
//! page_size = 100
//!
//! [export]
//! location = "/srv/backups/stormpath"
//! kinds = ["applications", "directories", "accounts"]
//!
//! [logging]
//! level = "info"
//! local_enabled = true
//! local_path = "${HOME}/.stormpath/logs"
//! local_rotation = "daily"
//! ```

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use credentials::{
    resolve_credentials, ApiCredentials, CredentialStore, ResolvedCredentials, StoredCredentials,
    CREDENTIALS_PATH_ENV,
};
pub use loader::load_settings;
pub use schema::{ClientConfig, ExportConfig, LoggingConfig, Settings, DEFAULT_BASE_URL};
pub use secret::{secret_string, SecretString, SecretValue};
