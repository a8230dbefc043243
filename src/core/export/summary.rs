//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{ExportError, IdentityError, ResourceKind};
use std::time::Duration;

/// Outcome counters for one resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub kind: ResourceKind,

    /// Documents written
    pub exported: usize,

    /// Items skipped because they could not be projected
    pub failed: usize,

    /// Whether fetching the kind stopped early on a service error
    pub aborted: bool,
}

impl KindSummary {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            exported: 0,
            failed: 0,
            aborted: false,
        }
    }
}

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Short ID of the exported tenant, once resolved
    pub tenant_id: Option<String>,

    /// Per-kind counters, in export order
    pub kinds: Vec<KindSummary>,

    /// Duration of the export
    pub duration: Duration,

    /// Failures encountered during export
    pub failures: Vec<ExportFailure>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            tenant_id: None,
            kinds: Vec::new(),
            duration: Duration::from_secs(0),
            failures: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a failure
    pub fn add_failure(&mut self, failure: ExportFailure) {
        self.failures.push(failure);
    }

    /// Counters for `kind`, created on first use
    pub fn kind_mut(&mut self, kind: ResourceKind) -> &mut KindSummary {
        let position = match self.kinds.iter().position(|k| k.kind == kind) {
            Some(position) => position,
            None => {
                self.kinds.push(KindSummary::new(kind));
                self.kinds.len() - 1
            }
        };
        &mut self.kinds[position]
    }

    pub fn kind(&self, kind: ResourceKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    /// Total documents written, tenant meta included
    pub fn total_exported(&self) -> usize {
        self.kinds.iter().map(|k| k.exported).sum()
    }

    /// Total items skipped
    pub fn total_failed(&self) -> usize {
        self.kinds.iter().map(|k| k.failed).sum()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && self.kinds.iter().all(|k| k.failed == 0 && !k.aborted)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            tenant_id = self.tenant_id.as_deref().unwrap_or("unknown"),
            exported = self.total_exported(),
            failed = self.total_failed(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        for kind in &self.kinds {
            tracing::info!(
                kind = %kind.kind,
                exported = kind.exported,
                failed = kind.failed,
                aborted = kind.aborted,
                "Kind summary"
            );
        }

        if !self.failures.is_empty() {
            tracing::warn!(
                error_count = self.failures.len(),
                "Export completed with errors"
            );
            for failure in &self.failures {
                tracing::warn!(
                    failure_type = ?failure.failure_type,
                    message = %failure.message,
                    context = failure.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Could not reach the identity service
    Connection,
    /// Credentials rejected
    Authentication,
    /// Service answered with an error or an unexpected payload
    Query,
    /// Item could not be normalized or had no usable locator
    Normalization,
    /// Output could not be written
    Storage,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&ExportError> for FailureType {
    fn from(error: &ExportError) -> Self {
        match error {
            ExportError::Identity(IdentityError::ConnectionFailed(_))
            | ExportError::Identity(IdentityError::Timeout(_)) => FailureType::Connection,
            ExportError::Identity(IdentityError::AuthenticationFailed(_)) => {
                FailureType::Authentication
            }
            ExportError::Identity(_) => FailureType::Query,
            ExportError::Normalization(_) | ExportError::InvalidResource(_) => {
                FailureType::Normalization
            }
            ExportError::Io(_) | ExportError::Serialization(_) => FailureType::Storage,
            ExportError::Configuration(_) | ExportError::Validation(_) => {
                FailureType::Configuration
            }
        }
    }
}

/// Export failure with context
#[derive(Debug, Clone)]
pub struct ExportFailure {
    /// Type of failure
    pub failure_type: FailureType,

    /// Failure message
    pub message: String,

    /// Optional context (e.g., kind, resource href)
    pub context: Option<String>,
}

impl ExportFailure {
    /// Create a new export failure
    pub fn new(failure_type: FailureType, message: String) -> Self {
        Self {
            failure_type,
            message,
            context: None,
        }
    }

    /// Classify an error into a failure record
    pub fn from_error(error: &ExportError) -> Self {
        Self::new(FailureType::from(error), error.to_string())
    }

    /// Add context to the failure
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert!(summary.tenant_id.is_none());
        assert!(summary.kinds.is_empty());
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failures.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_kind_mut_creates_once() {
        let mut summary = ExportSummary::new();
        summary.kind_mut(ResourceKind::Applications).exported += 2;
        summary.kind_mut(ResourceKind::Applications).exported += 1;
        summary.kind_mut(ResourceKind::Accounts).failed += 1;

        assert_eq!(summary.kinds.len(), 2);
        assert_eq!(summary.kind(ResourceKind::Applications).unwrap().exported, 3);
        assert_eq!(summary.total_exported(), 3);
        assert_eq!(summary.total_failed(), 1);
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new();
        summary.kind_mut(ResourceKind::Groups).exported = 10;
        assert!(summary.is_successful());

        summary.kind_mut(ResourceKind::Groups).failed = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_aborted_kind_is_not_successful() {
        let mut summary = ExportSummary::new();
        summary.kind_mut(ResourceKind::Directories).aborted = true;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_failure_type_classification() {
        let auth = ExportError::Identity(IdentityError::AuthenticationFailed("401".to_string()));
        let timeout = ExportError::Identity(IdentityError::Timeout("30s".to_string()));
        let server = ExportError::Identity(IdentityError::ServerError {
            status: 500,
            message: "boom".to_string(),
        });

        assert_eq!(FailureType::from(&auth), FailureType::Authentication);
        assert_eq!(FailureType::from(&timeout), FailureType::Connection);
        assert_eq!(FailureType::from(&server), FailureType::Query);
        assert_eq!(
            FailureType::from(&ExportError::Normalization("x".to_string())),
            FailureType::Normalization
        );
        assert_eq!(
            FailureType::from(&ExportError::Io("disk".to_string())),
            FailureType::Storage
        );
    }

    #[test]
    fn test_export_failure_with_context() {
        let failure = ExportFailure::from_error(&ExportError::Normalization(
            "Resource has no createdAt timestamp".to_string(),
        ))
        .with_context("kind=accounts".to_string());

        assert_eq!(failure.failure_type, FailureType::Normalization);
        assert!(failure.message.contains("createdAt"));
        assert_eq!(failure.context, Some("kind=accounts".to_string()));
    }
}
