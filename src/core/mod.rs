//! Core export logic.
//!
//! # Modules
//!
//! - [`normalize`] - Custom-data and timestamp normalization
//! - [`project`] - One pure projection per resource kind
//! - [`writer`] - Key-sorted JSON document sink
//! - [`export`] - Orchestration, layout and summary
//!
//! # Export Workflow
//!
//! 1. **Tenant**: Fetch the tenant and resolve its ID, which keys every path
//! 2. **Collections**: Applications, directories, groups, organizations, accounts
//! 3. **Project**: Turn each remote record into its document
//! 4. **Write**: `<root>/<tenantId>/<kind>/<id>.json`
//! 5. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use stormpath_export::adapters::stormpath::StormpathClient;
//! use stormpath_export::config::{ApiCredentials, ClientConfig};
//! use stormpath_export::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ApiCredentials::new("ID".to_string(), "SECRET".to_string());
//! let client = StormpathClient::new(&ClientConfig::default(), credentials)?;
//!
//! let coordinator = ExportCoordinator::new(Arc::new(client), "stormpath-exports");
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Exported: {}", summary.total_exported());
//! println!("Failed: {}", summary.total_failed());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod normalize;
pub mod project;
pub mod writer;
