//! CLI command implementations

pub mod configure;
pub mod export;
