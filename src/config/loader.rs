//! Settings loader with TOML parsing and environment variable overrides

use super::schema::Settings;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads settings from a TOML file
///
/// This function:
/// 1. Reads the TOML file, or starts from defaults when it does not exist
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`Settings`]
/// 4. Applies environment variable overrides (STORMPATH_EXPORT_* prefix)
/// 5. Validates the settings
///
/// # Errors
///
/// Returns an error if:
/// - File exists but cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Validation fails
///
/// # Examples
///
/// ```no_run
/// use stormpath_export::config::loader::load_settings;
///
/// let settings = load_settings("stormpath-export.toml").expect("Failed to load settings");
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    let mut settings = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            ExportError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let contents = substitute_env_vars(&contents)?;

        toml::from_str(&contents)
            .map_err(|e| ExportError::Configuration(format!("Failed to parse TOML: {}", e)))?
    } else {
        tracing::debug!(path = %path.display(), "No settings file, using defaults");
        Settings::default()
    };

    apply_env_overrides(&mut settings)?;

    settings
        .validate()
        .map_err(|e| ExportError::Validation(format!("Configuration validation failed: {}", e)))?;

    Ok(settings)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the STORMPATH_EXPORT_* prefix
///
/// Variables follow the pattern `STORMPATH_EXPORT_<SECTION>_<KEY>`, e.g.
/// `STORMPATH_EXPORT_CLIENT_PAGE_SIZE`. Numeric values that do not parse are
/// rejected rather than ignored.
fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    // Client overrides
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_CLIENT_BASE_URL") {
        settings.client.base_url = val;
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_CLIENT_TIMEOUT_SECONDS") {
        settings.client.timeout_seconds = parse_override("CLIENT_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_CLIENT_PAGE_SIZE") {
        settings.client.page_size = parse_override("CLIENT_PAGE_SIZE", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_EXPORT_LOCATION") {
        settings.export.location = Some(val);
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_EXPORT_KINDS") {
        settings.export.kinds = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Logging overrides
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_LOGGING_LEVEL") {
        settings.logging.level = val;
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_LOGGING_LOCAL_ENABLED") {
        settings.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_LOGGING_LOCAL_PATH") {
        settings.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("STORMPATH_EXPORT_LOGGING_LOCAL_ROTATION") {
        settings.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        ExportError::Configuration(format!(
            "Invalid value for STORMPATH_EXPORT_{key} '{value}': {e}"
        ))
    })
}
