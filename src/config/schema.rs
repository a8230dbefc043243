//! Configuration schema types
//!
//! Every section is optional; a settings file may be absent altogether.

use crate::domain::ResourceKind;
use serde::{Deserialize, Serialize};

/// Default Stormpath REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.stormpath.com/v1";

/// Largest page the service will return
pub const MAX_PAGE_SIZE: u32 = 100;

/// Root of the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Identity service client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.client.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Items requested per collection page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl ClientConfig {
    /// Validates URL scheme, timeout and page size
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid client.base_url '{}': {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "client.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "client.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "client.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output root; `<cwd>/stormpath-exports` when unset
    #[serde(default)]
    pub location: Option<String>,

    /// Kinds to export; every kind when empty
    #[serde(default)]
    pub kinds: Vec<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        self.selected_kinds().map(|_| ()).map_err(|e| e.to_string())
    }

    /// The configured kinds in export order, `None` meaning all of them
    pub fn selected_kinds(&self) -> crate::domain::Result<Option<Vec<ResourceKind>>> {
        if self.kinds.is_empty() {
            return Ok(None);
        }
        ResourceKind::parse_selection(&self.kinds.join(",")).map(Some)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `--log-level` is not given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.client.base_url, "https://api.stormpath.com/v1");
        assert_eq!(settings.client.timeout_seconds, 30);
        assert_eq!(settings.client.page_size, 100);
        assert!(settings.export.location.is_none());
        assert!(!settings.logging.local_enabled);
    }

    #[test]
    fn test_client_config_validation() {
        let mut config = ClientConfig::default();
        assert!(config.validate().is_ok());

        config.page_size = 0;
        assert!(config.validate().is_err());
        config.page_size = 101;
        assert!(config.validate().is_err());
        config.page_size = 25;
        assert!(config.validate().is_ok());

        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.timeout_seconds = 30;

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.base_url = "ftp://api.stormpath.com/v1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_kinds() {
        let mut config = ExportConfig::default();
        assert_eq!(config.selected_kinds().unwrap(), None);

        config.kinds = vec!["accounts".to_string(), "groups".to_string()];
        assert_eq!(
            config.selected_kinds().unwrap(),
            Some(vec![ResourceKind::Groups, ResourceKind::Accounts])
        );
        assert!(config.validate().is_ok());

        config.kinds = vec!["widgets".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
        config.local_rotation = "hourly".to_string();
        assert!(config.validate().is_ok());

        config.level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[client]
page_size = 50
"#,
        )
        .unwrap();

        assert_eq!(settings.client.page_size, 50);
        assert_eq!(settings.client.timeout_seconds, 30);
        assert_eq!(settings.logging.level, "info");
    }
}
