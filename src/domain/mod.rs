//! Domain models and types.
//!
//! The domain layer provides:
//! - **Identifiers** ([`ResourceId`]) resolved from resource locators
//! - **Resource kinds** ([`ResourceKind`], [`AccountStoreKind`])
//! - **Remote resource records** handed over by the identity service
//! - **Error types** ([`ExportError`], [`IdentityError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use stormpath_export::domain::{ResourceId, ResourceKind};
//!
//! # fn example() -> stormpath_export::domain::Result<()> {
//! let id = ResourceId::from_href("https://api.stormpath.com/v1/directories/d1")?;
//! assert_eq!(id.as_str(), "d1");
//! assert_eq!(ResourceKind::Directories.folder(), Some("directories"));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod kinds;
pub mod resources;
pub mod result;

pub use errors::{ExportError, IdentityError};
pub use ids::ResourceId;
pub use kinds::{AccountStoreKind, ResourceKind};
pub use resources::{
    Account, AccountStore, AccountStoreMapping, AccountSummary, Agent, AgentAccountConfig,
    AgentConfig, AgentGroupConfig, ApiKey, Application, CustomData, Directory, DirectorySummary,
    EmailTemplate, Group, GroupSummary, Organization, PasswordPolicy, PasswordStrength, Provider,
    Tenant, Timestamp,
};
pub use result::Result;
