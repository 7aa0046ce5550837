//! Shared utilities and common types for the Spatial ID API server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The error response wire structure
//! - Primitive string validators
//! - Language selection for localized messages

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, ServerConfig};
pub use errors::{ErrorResponse, CODE_PREFIX, DETAIL_FORMAT};
pub use types::Language;
pub use utils::{validation, validators};
