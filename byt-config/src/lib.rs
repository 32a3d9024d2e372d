//! Shared configuration library for the Build-Your-Tech admin tools.
//!
//! One place for defaults, layering rules and validation so the binary and
//! its tests agree on what a valid configuration is.

pub mod loader;
pub mod models;

pub use loader::{ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError};
pub use models::{
    AdminConfig, ApiConfig, CartConfig, ConfigOverrides, LoggingConfig,
    OperatorConfig,
};
