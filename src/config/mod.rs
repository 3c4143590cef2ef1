//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config structs (Config, ServerConfig) and loading
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup checks run by [`Config::load`]

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ServerConfig};
