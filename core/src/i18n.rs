//! Message source seam
//!
//! Core code renders operational and client messages through
//! [`MessageSource`]; the api crate backs it with the TOML catalog.

use sid_shared::Language;

/// Lookup of localized message templates by key
pub trait MessageSource: Send + Sync {
    /// Render `key` in `language` with positional `params`
    ///
    /// Unknown keys render as the key itself.
    fn message(&self, key: &str, params: &[String], language: Language) -> String;
}

/// Replace positional `{0}`, `{1}`, ... placeholders with `params`
///
/// The template is scanned once, so parameter values are never themselves
/// substituted. Placeholders without a matching parameter are left in place.
pub fn format_message(template: &str, params: &[String]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];
        match placeholder(tail, params) {
            Some((value, consumed)) => {
                result.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                result.push('{');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Parameter for the `{n}` token at the start of `tail`, with the token length
fn placeholder<'p>(tail: &str, params: &'p [String]) -> Option<(&'p str, usize)> {
    let close = tail.find('}')?;
    let index = &tail[1..close];
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = params.get(index.parse::<usize>().ok()?)?;
    Some((value.as_str(), close + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let params = vec!["siteId".to_string(), "siteId=abc".to_string()];
        assert_eq!(
            format_message("Invalid {0} ({1})", &params),
            "Invalid siteId (siteId=abc)"
        );
        assert_eq!(format_message("{0} and {0}", &params[..1]), "siteId and siteId");
    }

    #[test]
    fn test_missing_params_keep_placeholders() {
        assert_eq!(format_message("Value: {0}, {1}", &[]), "Value: {0}, {1}");
        assert_eq!(format_message("No placeholders", &["x".to_string()]), "No placeholders");
    }

    #[test]
    fn test_parameter_values_are_not_rescanned() {
        let params = vec!["{1}".to_string(), "x".to_string()];
        assert_eq!(
            format_message("names={0} values={1}", &params),
            "names={1} values=x"
        );
    }

    #[test]
    fn test_non_numeric_braces_kept() {
        let params = vec!["a".to_string()];
        assert_eq!(format_message("{} {x} {{0} {0", &params), "{} {x} {a {0");
    }
}
