//! # Spatial ID API
//!
//! Actix-web surface of the Spatial ID API: the message catalog, the
//! error-to-response mapping, request-language middleware and routes.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, create_app};
pub use config::{Config, ErrorConfig};
