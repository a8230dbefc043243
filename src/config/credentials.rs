//! API credentials and the per-user credential store
//!
//! Credentials are resolved once, in the CLI, and handed to the client as an
//! [`ApiCredentials`] value. The on-disk store is one JSON file,
//! `~/.stormpath/stormpath-export.json`:
//!
//! ```json
//! {"api_key_id": "...", "api_key_secret": "...", "base_url": "..."}
//! ```

use crate::config::secret::{secret_string, SecretString};
use crate::domain::{ExportError, Result};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the credential file location
pub const CREDENTIALS_PATH_ENV: &str = "STORMPATH_EXPORT_CREDENTIALS";

const CREDENTIALS_DIR: &str = ".stormpath";
const CREDENTIALS_FILE: &str = "stormpath-export.json";

/// API key pair used for HTTP Basic authentication
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    id: String,
    secret: SecretString,
}

impl ApiCredentials {
    pub fn new(id: String, secret: String) -> Self {
        Self {
            id,
            secret: secret_string(secret),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    fn validate(self) -> Result<Self> {
        if self.id.trim().is_empty() || self.secret.expose_secret().is_empty() {
            return Err(ExportError::Configuration(
                "API key id and secret cannot be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Contents of the credential file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub api_key_id: String,
    pub api_key_secret: SecretString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl StoredCredentials {
    pub fn credentials(&self) -> ApiCredentials {
        ApiCredentials {
            id: self.api_key_id.clone(),
            secret: self.api_key_secret.clone(),
        }
    }
}

/// JSON file holding the user's stored credentials
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at its default location
    ///
    /// `$STORMPATH_EXPORT_CREDENTIALS` wins when set, otherwise
    /// `~/.stormpath/stormpath-export.json`.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CREDENTIALS_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home = dirs::home_dir().ok_or_else(|| {
            ExportError::Configuration("Could not determine home directory".to_string())
        })?;
        Ok(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the store; `Ok(None)` when the file does not exist
    pub fn load(&self) -> Result<Option<StoredCredentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            ExportError::Configuration(format!(
                "Failed to read credential file {}: {e}",
                self.path.display()
            ))
        })?;
        let stored = serde_json::from_str(&contents).map_err(|e| {
            ExportError::Configuration(format!(
                "Invalid credential file {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Some(stored))
    }

    /// Writes the store, creating its directory, with owner-only permissions
    ///
    /// The file is created 0600 before any secret is written; an existing
    /// file is narrowed to 0600 first.
    pub fn save(&self, stored: &StoredCredentials) -> Result<()> {
        let json = serde_json::to_string_pretty(stored)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            if self.path.exists() {
                fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
            }
        }

        let mut file = options.open(&self.path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}

/// Credentials and base URL after resolution
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub credentials: ApiCredentials,

    /// Base URL from the credential file, if it holds one
    pub stored_base_url: Option<String>,
}

/// Resolves credentials: an inline pair wins, then the credential store
///
/// Returns `Ok(None)` when neither source has credentials.
///
/// # Errors
///
/// Only one of id/secret given inline, an unreadable credential file, or an
/// empty id/secret are configuration errors.
pub fn resolve_credentials(
    id: Option<&str>,
    secret: Option<&str>,
    store: &CredentialStore,
) -> Result<Option<ResolvedCredentials>> {
    match (id, secret) {
        (Some(id), Some(secret)) => {
            let credentials = ApiCredentials::new(id.to_string(), secret.to_string()).validate()?;
            tracing::debug!(api_key_id = %credentials.id(), "Using inline credentials");
            return Ok(Some(ResolvedCredentials {
                credentials,
                stored_base_url: None,
            }));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(ExportError::Configuration(
                "Both --id and --secret must be provided together".to_string(),
            ));
        }
        (None, None) => {}
    }

    match store.load()? {
        Some(stored) => {
            let credentials = stored.credentials().validate()?;
            tracing::debug!(
                api_key_id = %credentials.id(),
                path = %store.path().display(),
                "Using stored credentials"
            );
            Ok(Some(ResolvedCredentials {
                credentials,
                stored_base_url: stored.base_url,
            }))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stored(base_url: Option<&str>) -> StoredCredentials {
        StoredCredentials {
            api_key_id: "KEYID".to_string(),
            api_key_secret: secret_string("KEYSECRET".to_string()),
            base_url: base_url.map(String::from),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join(".stormpath/stormpath-export.json"));
        assert!(store.load().unwrap().is_none());

        store.save(&stored(Some("https://enterprise.stormpath.io/v1"))).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.api_key_id, "KEYID");
        assert_eq!(loaded.api_key_secret.expose_secret(), "KEYSECRET");
        assert_eq!(
            loaded.base_url.as_deref(),
            Some("https://enterprise.stormpath.io/v1")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("creds.json"));
        store.save(&stored(None)).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_narrows_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("creds.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = CredentialStore::new(path.clone());
        store.save(&stored(None)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().api_key_id, "KEYID");
    }

    #[test]
    fn test_inline_credentials_win() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("creds.json"));
        store.save(&stored(Some("https://stored.example.com/v1"))).unwrap();

        let resolved = resolve_credentials(Some("INLINE"), Some("S"), &store)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.credentials.id(), "INLINE");
        assert!(resolved.stored_base_url.is_none());
    }

    #[test]
    fn test_falls_back_to_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("creds.json"));
        store.save(&stored(None)).unwrap();

        let resolved = resolve_credentials(None, None, &store).unwrap().unwrap();
        assert_eq!(resolved.credentials.id(), "KEYID");
    }

    #[test]
    fn test_no_credentials_anywhere() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("missing.json"));
        assert!(resolve_credentials(None, None, &store).unwrap().is_none());
    }

    #[test]
    fn test_half_inline_pair_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(temp_dir.path().join("missing.json"));
        assert!(resolve_credentials(Some("ID"), None, &store).is_err());
        assert!(resolve_credentials(None, Some("SECRET"), &store).is_err());
    }

    #[test]
    fn test_corrupt_store_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("creds.json");
        fs::write(&path, "{not json").unwrap();

        let err = CredentialStore::new(path).load().unwrap_err();
        assert!(matches!(err, ExportError::Configuration(_)));
    }
}
