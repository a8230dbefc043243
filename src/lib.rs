//! # Stormpath Export
//!
//! Backs up a Stormpath tenant to the local filesystem: the tenant itself,
//! then its applications, directories, organizations, groups and accounts,
//! one pretty-printed, key-sorted JSON document per resource.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface (`configure`, and the default export)
//! - [`core`] - Export orchestration, document projection, normalization and
//!   file writing
//! - [`adapters`] - The Stormpath REST client behind the
//!   [`adapters::stormpath::IdentityService`] trait
//! - [`domain`] - Resource records, identifiers, kinds and errors
//! - [`config`] - Settings file and credential resolution
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stormpath_export::adapters::stormpath::StormpathClient;
//! use stormpath_export::config::{ApiCredentials, ClientConfig};
//! use stormpath_export::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ApiCredentials::new("ID".to_string(), "SECRET".to_string());
//!     let client = StormpathClient::new(&ClientConfig::default(), credentials)?;
//!
//!     let coordinator = ExportCoordinator::new(Arc::new(client), "/tmp/out");
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} resources", summary.total_exported());
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! ```text
//! <root>/<tenantId>/meta.json
//! <root>/<tenantId>/applications/<id>.json
//! <root>/<tenantId>/directories/<id>.json
//! <root>/<tenantId>/organizations/<id>.json
//! <root>/<tenantId>/groups/<id>.json
//! <root>/<tenantId>/accounts/<id>.json
//! ```
//!
//! Running the export twice against an unchanged tenant produces
//! byte-identical files.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::ExportError`]. A failure while fetching a
//! kind aborts only that kind; a resource that cannot be normalized is
//! skipped and counted; filesystem errors end the run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
