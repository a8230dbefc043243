//! External system integrations.
//!
//! The exporter talks to exactly one remote system, the Stormpath identity
//! service. The coordinator only sees the [`stormpath::IdentityService`]
//! trait, so tests swap the HTTP client for an in-memory fake.
//!
//! ```rust,no_run
//! use stormpath_export::adapters::stormpath::{IdentityService, StormpathClient};
//! use stormpath_export::config::{ApiCredentials, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig {
//!     base_url: "https://enterprise.stormpath.io/v1".to_string(),
//!     ..Default::default()
//! };
//! let credentials = ApiCredentials::new("ID".to_string(), "SECRET".to_string());
//!
//! let client = StormpathClient::new(&config, credentials)?;
//! let tenant = client.tenant().await?;
//! println!("{}", tenant.href);
//! # Ok(())
//! # }
//! ```

pub mod stormpath;
