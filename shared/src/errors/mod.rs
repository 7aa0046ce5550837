//! Shared error response structure

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Prefix placed in front of the HTTP reason phrase in `code`
pub const CODE_PREFIX: &str = "[infra-dx]";

/// `chrono` rendering of `yyyy/MM/dd HH:mm:ss`
pub const DETAIL_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Error body returned by every failed API request
///
/// ```json
/// { "code": "[infra-dx] Not Found", "message": "...", "detail": "2025/01/31 09:15:00" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Prefixed HTTP reason phrase
    pub code: String,

    /// Rendered, localized message
    pub message: String,

    /// Time the response was built
    pub detail: String,
}

impl ErrorResponse {
    /// Build a response stamped with the current local time
    pub fn new(reason_phrase: &str, message: impl Into<String>) -> Self {
        Self::with_prefix(CODE_PREFIX, reason_phrase, message)
    }

    /// Build a response with a custom code prefix
    pub fn with_prefix(prefix: &str, reason_phrase: &str, message: impl Into<String>) -> Self {
        Self::at(prefix, reason_phrase, message, Local::now().naive_local())
    }

    /// Build a response stamped with an explicit time
    pub fn at(
        prefix: &str,
        reason_phrase: &str,
        message: impl Into<String>,
        time: NaiveDateTime,
    ) -> Self {
        Self::formatted(prefix, reason_phrase, message, time, DETAIL_FORMAT)
    }

    /// Build a response whose `detail` uses a custom `chrono` format
    ///
    /// `detail_format` must be a valid format string.
    pub fn formatted(
        prefix: &str,
        reason_phrase: &str,
        message: impl Into<String>,
        time: NaiveDateTime,
        detail_format: &str,
    ) -> Self {
        Self {
            code: format!("{} {}", prefix, reason_phrase),
            message: message.into(),
            detail: time.format(detail_format).to_string(),
        }
    }
}
