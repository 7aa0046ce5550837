//! Building blocks of the error taxonomy: severities, log message keys and
//! ordered embedding pairs.

use std::fmt;

/// Operational severity, fixed per error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Logged at error level with the cause chain
    Error,
    /// Logged at warn level with the cause chain
    Warn,
    /// Logged at info level, message only
    Info,
    /// Caller mistake; never logged
    UserFault,
}

impl Severity {
    /// Whether failures of this severity reach the operational log
    pub fn is_logged(&self) -> bool {
        !matches!(self, Severity::UserFault)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
            Severity::UserFault => write!(f, "user-fault"),
        }
    }
}

/// Catalog keys of operational log messages
pub mod log_keys {
    /// Application started
    pub const BOOT: &str = "API_LOG_INFO0001";
    /// Invocation entry: `{0}` component, `{1}` operation, `{2}` arguments
    pub const START: &str = "API_LOG_INFO0002";
    /// Invocation exit: `{0}` component, `{1}` operation, `{2}` elapsed ms
    pub const END: &str = "API_LOG_INFO0003";
    pub const DATA_RANGE: &str = "API_LOG_INFO0004";
    pub const DATA_UPDATE: &str = "API_LOG_INFO0005";
    pub const EXCLUSIVE: &str = "API_LOG_INFO0007";
    /// Generic failure: `{0}` raw failure message
    pub const ERROR: &str = "API_LOG_ERROR0001";
    /// Internal API call failed: `{0}` API name
    pub const API_CALLING: &str = "API_LOG_ERROR0002";
    /// Access history update failed: `{0}` joined `key = value` pairs
    pub const ACCESS_HISTORY: &str = "API_LOG_WARN0004";
}

/// Ordered `(name, value)` pairs embedded into messages
///
/// Keeps insertion order so rendered messages are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddingPairs(Vec<(String, String)>);

impl EmbeddingPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.push((name.into(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names joined with `,`
    pub fn join_names(&self) -> String {
        self.iter().map(|(k, _)| k).collect::<Vec<_>>().join(",")
    }

    /// Pairs rendered as `name{separator}value` and joined with `,`
    pub fn join_pairs(&self, separator: &str) -> String {
        self.iter()
            .map(|(k, v)| format!("{}{}{}", k, separator, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<K, V> FromIterator<(K, V)> for EmbeddingPairs
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs = Self::new();
        for (k, v) in iter {
            pairs.push(k, v);
        }
        pairs
    }
}

impl fmt::Display for EmbeddingPairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_pairs("="))
    }
}
