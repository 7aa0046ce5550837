//! Mapping of [`ApiError`] to HTTP responses.
//!
//! Every failed request ends here: the error kind decides the status and
//! the catalog message, and the body is the shared [`ErrorResponse`].

use actix_web::{http::StatusCode, web, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use chrono::Local;
use sid_core::errors::{ApiError, EmbeddingPairs, ParamErrorSource, Severity};
use sid_core::i18n::MessageSource;
use sid_core::validation::ViolationSet;
use sid_shared::{ErrorResponse, Language};
use std::fmt;

use crate::config::ErrorConfig;
use crate::i18n::MESSAGES;

/// Catalog keys of client-facing error messages
pub mod message_keys {
    pub const BAD_REQUEST: &str = "error.api.badrequest";
    pub const NOT_FOUND: &str = "error.api.notfound";
    pub const CONFLICT: &str = "error.api.conflict";
    pub const INTERNAL_SERVER_ERROR: &str = "error.api.internalservererror";
    pub const FORBIDDEN: &str = "error.api.forbidden";
    pub const EXCLUSIVE_ERROR: &str = "error.api.exclusiveerror";
    pub const NO_DATA_ERROR: &str = "error.api.nodataerror";
    pub const DATA_UPDATE_ERROR: &str = "error.api.dataupdateerror";
    pub const URI_NOT_FOUND: &str = "error.api.urinotfound";
}

/// Outcome of classifying a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: StatusCode,
    pub message: String,
    pub severity: Severity,
}

/// Status, message key and message parameters of each kind
fn response_template(error: &ApiError) -> (StatusCode, &'static str, Vec<String>) {
    match error {
        ApiError::InternalApiCalling { api_name } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            message_keys::INTERNAL_SERVER_ERROR,
            vec![api_name.clone()],
        ),
        ApiError::AccessHistoryUpdate { .. } | ApiError::Unexpected(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            message_keys::INTERNAL_SERVER_ERROR,
            Vec::new(),
        ),
        ApiError::UriNotFound => (StatusCode::NOT_FOUND, message_keys::URI_NOT_FOUND, Vec::new()),
        ApiError::NotFound {
            invalid_path_params,
        } => (
            StatusCode::NOT_FOUND,
            message_keys::NOT_FOUND,
            vec![invalid_path_params.join_pairs("=")],
        ),
        ApiError::ParamError(source) => {
            let [names, pairs] = match source {
                ParamErrorSource::Violations(violations) => embed_from_violations(violations),
                ParamErrorSource::Embedding(embedding) => embed_from_map(embedding),
            };
            (StatusCode::BAD_REQUEST, message_keys::BAD_REQUEST, vec![names, pairs])
        }
        ApiError::DuplicateKey { duplicated_key } => (
            StatusCode::CONFLICT,
            message_keys::CONFLICT,
            vec![duplicated_key.clone()],
        ),
        ApiError::DataUpdateFailure => (
            StatusCode::INTERNAL_SERVER_ERROR,
            message_keys::DATA_UPDATE_ERROR,
            Vec::new(),
        ),
        ApiError::AccessDenied => (StatusCode::FORBIDDEN, message_keys::FORBIDDEN, Vec::new()),
        ApiError::DataRange => (
            StatusCode::INTERNAL_SERVER_ERROR,
            message_keys::NO_DATA_ERROR,
            Vec::new(),
        ),
        ApiError::ExclusiveError => (
            StatusCode::CONFLICT,
            message_keys::EXCLUSIVE_ERROR,
            Vec::new(),
        ),
    }
}

/// HTTP status of a failure
pub fn status_of(error: &ApiError) -> StatusCode {
    response_template(error).0
}

/// Decide status, localized message and severity of a failure
///
/// Failures outside the taxonomy classify as [`Severity::Error`].
pub fn classify(
    error: &ApiError,
    messages: &dyn MessageSource,
    language: Language,
) -> Classification {
    let (status, key, params) = response_template(error);
    Classification {
        status,
        message: messages.message(key, &params, language),
        severity: error.severity().unwrap_or(Severity::Error),
    }
}

/// Error body for `status`, stamped with the current local time
pub fn build_response(status: StatusCode, message: String, config: &ErrorConfig) -> ErrorResponse {
    ErrorResponse::formatted(
        &config.code_prefix,
        status.canonical_reason().unwrap_or("Unknown"),
        message,
        Local::now().naive_local(),
        &config.detail_format,
    )
}

/// Field names and `name=value` pairs of every rejected field, comma joined
pub fn embed_from_violations(violations: &ViolationSet) -> [String; 2] {
    join_embedding(
        violations
            .rejected_fields()
            .map(|field| (field.name.as_str(), field.value.as_str())),
    )
}

/// Names and `name=value` pairs of a plain embedding, comma joined
pub fn embed_from_map(embedding: &EmbeddingPairs) -> [String; 2] {
    join_embedding(embedding.iter())
}

fn join_embedding<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> [String; 2] {
    let mut names = Vec::new();
    let mut joined = Vec::new();
    for (name, value) in pairs {
        names.push(name.to_string());
        joined.push(format!("{}={}", name, value));
    }
    [names.join(","), joined.join(",")]
}

/// Language for a request: middleware choice, then header, then default
pub fn extract_language(req: &HttpRequest, default: Language) -> Language {
    if let Some(language) = req.extensions().get::<Language>() {
        return *language;
    }
    req.headers()
        .get("Accept-Language")
        .and_then(|v| v.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or(default)
}

/// [`ApiError`] bound to the request it failed
#[derive(Debug)]
pub struct ApiFailure {
    pub error: ApiError,
    pub language: Language,
    pub config: ErrorConfig,
}

impl ApiFailure {
    /// Failure rendered with the default configuration and language
    pub fn new(error: ApiError) -> Self {
        let config = ErrorConfig::default();
        Self {
            error,
            language: config.default_language,
            config,
        }
    }

    pub fn from_request(error: ApiError, req: &HttpRequest) -> Self {
        let config = req
            .app_data::<web::Data<ErrorConfig>>()
            .map(|data| data.get_ref().clone())
            .unwrap_or_default();
        Self {
            error,
            language: extract_language(req, config.default_language),
            config,
        }
    }

    pub fn classify(&self) -> Classification {
        classify(&self.error, &*MESSAGES, self.language)
    }
}

impl From<ApiError> for ApiFailure {
    fn from(error: ApiError) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiFailure {
    fn status_code(&self) -> StatusCode {
        status_of(&self.error)
    }

    fn error_response(&self) -> HttpResponse {
        let classification = self.classify();
        let body = build_response(classification.status, classification.message, &self.config);
        HttpResponse::build(classification.status).json(body)
    }
}

/// Default service: any URI without a route
pub async fn uri_not_found(req: HttpRequest) -> Result<HttpResponse, ApiFailure> {
    Err(ApiFailure::from_request(ApiError::UriNotFound, &req))
}

/// `JsonConfig` error handler: unreadable bodies are parameter errors
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    let embedding = EmbeddingPairs::new().with("body", err);
    ApiFailure::from_request(ApiError::param_error_from_map(embedding), req).into()
}
