//! Stormpath REST adapter
//!
//! - [`IdentityService`]: what the exporter needs from the remote side
//! - [`StormpathClient`]: the HTTP implementation, paging every collection
//!   and resolving linked resources one request at a time
//! - [`models`]: wire shapes of the REST API

pub mod client;
pub mod models;
pub mod service;

pub use client::StormpathClient;
pub use service::{IdentityService, ItemPage};
