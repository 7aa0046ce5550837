use chrono::format::{Item, StrftimeItems};
use sid_shared::validators;
use sid_shared::{ConfigError, Language, CODE_PREFIX, DETAIL_FORMAT};
use std::env;

/// Error response configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorConfig {
    /// Placed in front of the reason phrase in `code`
    pub code_prefix: String,

    /// `chrono` format of the `detail` timestamp
    pub detail_format: String,

    /// Language used when the request does not ask for one
    pub default_language: Language,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            code_prefix: CODE_PREFIX.to_string(),
            detail_format: DETAIL_FORMAT.to_string(),
            default_language: Language::default(),
        }
    }
}

impl ErrorConfig {
    /// Read `ERROR_CODE_PREFIX`, `ERROR_DETAIL_FORMAT` and `DEFAULT_LANGUAGE`
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let code_prefix = non_blank_var("ERROR_CODE_PREFIX").unwrap_or(defaults.code_prefix);

        let detail_format =
            non_blank_var("ERROR_DETAIL_FORMAT").unwrap_or(defaults.detail_format);
        if StrftimeItems::new(&detail_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue {
                name: "ERROR_DETAIL_FORMAT",
                value: detail_format,
            });
        }

        let default_language = match non_blank_var("DEFAULT_LANGUAGE") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "DEFAULT_LANGUAGE",
                value,
            })?,
            None => defaults.default_language,
        };

        Ok(Self {
            code_prefix,
            detail_format,
            default_language,
        })
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    let value = env::var(name).ok();
    if validators::is_blank(value.as_deref()) {
        None
    } else {
        value
    }
}
