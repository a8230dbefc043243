//! Export orchestration
//!
//! This module provides the core export logic, including:
//! - Coordination of the fixed kind sequence
//! - The on-disk layout of an export
//! - Summary and reporting

pub mod coordinator;
pub mod layout;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use layout::{ExportLayout, DEFAULT_EXPORT_DIR};
pub use summary::{ExportFailure, ExportSummary, FailureType, KindSummary};
