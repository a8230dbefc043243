//! Result type alias for the exporter

use super::errors::ExportError;

/// Result type alias that uses [`ExportError`] as the error type.
///
/// # Examples
///
/// ```
/// use stormpath_export::domain::result::Result;
/// use stormpath_export::domain::errors::ExportError;
///
/// fn failing_function() -> Result<()> {
///     Err(ExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;
