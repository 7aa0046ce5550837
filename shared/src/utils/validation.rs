//! Primitive string validators used by the request rule engine

/// Pattern checks over raw request strings
pub mod validators {
    use chrono::{DateTime, NaiveDate};
    use once_cell::sync::Lazy;
    use regex::Regex;

    static SIGNED_INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

    static NON_NEGATIVE_INTEGER_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

    static WHOLE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

    static DECIMAL_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[+-]?([1-9][0-9]*|0)(\.[0-9]+)?$").unwrap());

    /// Null-or-empty check for optional strings
    pub fn is_blank(value: Option<&str>) -> bool {
        value.map_or(true, str::is_empty)
    }

    /// Optional minus sign followed by digits (`-12`, `0`, `7`)
    pub fn is_signed_integer(value: &str) -> bool {
        SIGNED_INTEGER_REGEX.is_match(value)
    }

    /// Digits only (`0`, `42`, `007`)
    pub fn is_non_negative_integer(value: &str) -> bool {
        NON_NEGATIVE_INTEGER_REGEX.is_match(value)
    }

    /// Integer of at least 1 with no leading zero
    pub fn is_whole_number(value: &str) -> bool {
        WHOLE_NUMBER_REGEX.is_match(value)
    }

    /// Signed decimal with optional fraction (`+1.5`, `-0.25`, `10`)
    pub fn is_decimal(value: &str) -> bool {
        DECIMAL_REGEX.is_match(value)
    }

    /// Character count within `[min, max]`
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Timestamp with an explicit offset, e.g. `2024-05-01T10:00:00+09:00`
    pub fn is_timestamp(value: &str) -> bool {
        DateTime::parse_from_rfc3339(value).is_ok()
    }

    /// Calendar date in the given `chrono` format; impossible dates are rejected
    pub fn is_strict_date(value: &str, format: &str) -> bool {
        NaiveDate::parse_from_str(value, format).is_ok()
    }
}
