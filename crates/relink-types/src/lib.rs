//! Shared types for the relink workspace.
//!
//! Process configuration ([`Config`]) and the errors produced while
//! loading it ([`ConfigError`]).

pub mod config;
pub mod error;

pub use config::Config;
pub use error::ConfigError;
