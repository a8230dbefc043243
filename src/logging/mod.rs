//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output, filtered by `--log-level` or `RUST_LOG`
//! - Optional JSON log files with daily or hourly rotation
//! - Macros for the events every export run emits
//!
//! # Example
//!
//! ```no_run
//! use stormpath_export::logging::init_logging;
//! use stormpath_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Export started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of one resource kind
///
/// # Example
///
/// ```no_run
/// use stormpath_export::log_kind_start;
/// use stormpath_export::domain::ResourceKind;
///
/// log_kind_start!(ResourceKind::Applications);
/// ```
#[macro_export]
macro_rules! log_kind_start {
    ($kind:expr) => {
        tracing::info!(kind = %$kind, "Exporting resource kind");
    };
}

/// Log the completion of one resource kind
///
/// # Example
///
/// ```no_run
/// use stormpath_export::log_kind_complete;
/// use stormpath_export::domain::ResourceKind;
/// use std::time::Duration;
///
/// log_kind_complete!(ResourceKind::Accounts, 42, 1, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_kind_complete {
    ($kind:expr, $exported:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            kind = %$kind,
            exported = $exported,
            failed = $failed,
            duration_ms = $duration.as_millis() as u64,
            "Resource kind completed"
        );
    };
}

/// Log one written document
#[macro_export]
macro_rules! log_item_exported {
    ($kind:expr, $id:expr, $path:expr) => {
        tracing::debug!(
            kind = %$kind,
            id = %$id,
            path = %$path,
            "Exported resource"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use stormpath_export::log_error_with_context;
/// use stormpath_export::domain::ExportError;
///
/// let error = ExportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{ExportError, ResourceKind};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = ExportError::Io("disk full".to_string());
        crate::log_kind_start!(ResourceKind::Groups);
        crate::log_kind_complete!(ResourceKind::Groups, 3usize, 0usize, Duration::from_millis(5));
        crate::log_item_exported!(ResourceKind::Groups, "g1", "/tmp/g1.json");
        crate::log_error_with_context!(&error, format!("kind={}", ResourceKind::Groups));
    }
}
