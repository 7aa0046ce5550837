//! # Spatial ID API Core
//!
//! Request validation and error handling shared by every endpoint of the
//! Spatial ID API: the spatial ID checks and field rule engine, the error
//! taxonomy with its severities, and the boundary logger that records
//! handler invocations.

pub mod errors;
pub mod i18n;
pub mod logging;
pub mod validation;

// Re-export commonly used types for convenience
pub use errors::{ApiError, ApiResult, EmbeddingPairs, ParamErrorSource, Severity};
pub use i18n::MessageSource;
pub use logging::{Invocation, MethodBoundaryLogger};
