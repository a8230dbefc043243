//! Domain error types
//!
//! The error hierarchy is split the same way the export itself is staged:
//! failures talking to the identity service, failures shaping one resource,
//! and failures touching the local filesystem. The orchestrator decides how
//! far each one propagates; none of them expose third-party types.

use thiserror::Error;

/// Main error type for the exporter
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration-related errors (settings file, credentials, CLI input)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised by the remote identity service or its transport
    #[error("Identity service error: {0}")]
    Identity(#[from] IdentityError),

    /// A resource lacked the timestamp/custom-data shape the export needs
    #[error("Normalization error: {0}")]
    Normalization(String),

    /// A resource without a usable locator
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Settings that parsed but hold out-of-range values
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ExportError {
    /// Whether the error only invalidates the item being projected
    ///
    /// Item-scoped errors are logged and counted; the rest of the collection
    /// keeps going.
    pub fn is_item_scoped(&self) -> bool {
        matches!(
            self,
            ExportError::Normalization(_) | ExportError::InvalidResource(_)
        )
    }
}

/// Identity service errors
///
/// Raised by the REST adapter. Any of these aborts the resource kind being
/// exported, never the whole run.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Failed to reach the service
    #[error("Failed to connect to identity service: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx other than auth and not-found)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
