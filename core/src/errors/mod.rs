//! Error taxonomy of the API.
//!
//! Every failure a handler can return is an [`ApiError`]. Each kind has a
//! fixed [`Severity`] that decides how the boundary logger records it; the
//! HTTP mapping lives in the presentation layer.

mod types;

#[cfg(test)]
mod tests;

pub use types::{log_keys, EmbeddingPairs, Severity};

use thiserror::Error;

use crate::validation::ViolationSet;

/// Boxed cause carried by kinds that wrap an originating failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a `ParamError` was built from
#[derive(Debug, Clone, PartialEq)]
pub enum ParamErrorSource {
    /// Rule engine results, in the order the violations were found
    Violations(ViolationSet),
    /// Plain `name -> value` pairs, e.g. rejected path parameters
    Embedding(EmbeddingPairs),
}

/// All failures surfaced by request handling
#[derive(Error, Debug)]
pub enum ApiError {
    // Error severity
    #[error("Internal API call failed: {api_name}")]
    InternalApiCalling { api_name: String },

    // Warn severity
    #[error("Access history update failed: {embedding}")]
    AccessHistoryUpdate {
        embedding: EmbeddingPairs,
        #[source]
        source: Option<BoxError>,
    },

    // Info severity
    #[error("Requested area is outside the maintained data range")]
    DataRange,

    #[error("Target data is being updated")]
    DataUpdateFailure,

    #[error("Target data was modified by another request")]
    ExclusiveError,

    // User faults
    #[error("Invalid request parameters")]
    ParamError(ParamErrorSource),

    #[error("Resource not found: {invalid_path_params}")]
    NotFound { invalid_path_params: EmbeddingPairs },

    #[error("Access denied")]
    AccessDenied,

    #[error("Duplicate key: {duplicated_key}")]
    DuplicateKey { duplicated_key: String },

    #[error("URI not found")]
    UriNotFound,

    // Anything outside the taxonomy
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn internal_api_calling(api_name: impl Into<String>) -> Self {
        ApiError::InternalApiCalling {
            api_name: api_name.into(),
        }
    }

    pub fn access_history_update<E>(embedding: EmbeddingPairs, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        ApiError::AccessHistoryUpdate {
            embedding,
            source: Some(cause.into()),
        }
    }

    pub fn param_error(violations: ViolationSet) -> Self {
        ApiError::ParamError(ParamErrorSource::Violations(violations))
    }

    pub fn param_error_from_map(embedding: EmbeddingPairs) -> Self {
        ApiError::ParamError(ParamErrorSource::Embedding(embedding))
    }

    pub fn not_found(invalid_path_params: EmbeddingPairs) -> Self {
        ApiError::NotFound {
            invalid_path_params,
        }
    }

    pub fn duplicate_key(duplicated_key: impl Into<String>) -> Self {
        ApiError::DuplicateKey {
            duplicated_key: duplicated_key.into(),
        }
    }

    /// Severity of this kind; `None` for failures outside the taxonomy
    pub fn severity(&self) -> Option<Severity> {
        match self {
            ApiError::InternalApiCalling { .. } => Some(Severity::Error),
            ApiError::AccessHistoryUpdate { .. } => Some(Severity::Warn),
            ApiError::DataRange | ApiError::DataUpdateFailure | ApiError::ExclusiveError => {
                Some(Severity::Info)
            }
            ApiError::ParamError(_)
            | ApiError::NotFound { .. }
            | ApiError::AccessDenied
            | ApiError::DuplicateKey { .. }
            | ApiError::UriNotFound => Some(Severity::UserFault),
            ApiError::Unexpected(_) => None,
        }
    }

    /// Catalog key of the operational log message
    ///
    /// User faults and unexpected failures have none; the latter are logged
    /// with the generic [`log_keys::ERROR`] template.
    pub fn log_message_key(&self) -> Option<&'static str> {
        match self {
            ApiError::InternalApiCalling { .. } => Some(log_keys::API_CALLING),
            ApiError::AccessHistoryUpdate { .. } => Some(log_keys::ACCESS_HISTORY),
            ApiError::DataRange => Some(log_keys::DATA_RANGE),
            ApiError::DataUpdateFailure => Some(log_keys::DATA_UPDATE),
            ApiError::ExclusiveError => Some(log_keys::EXCLUSIVE),
            _ => None,
        }
    }

    /// Parameters substituted into the log message template
    pub fn embedded_params(&self) -> Vec<String> {
        match self {
            ApiError::InternalApiCalling { api_name } => vec![api_name.clone()],
            ApiError::AccessHistoryUpdate { embedding, .. } => vec![embedding.join_pairs(" = ")],
            _ => Vec::new(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
