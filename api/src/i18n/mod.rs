use once_cell::sync::Lazy;
use serde::Deserialize;
use sid_core::i18n::{format_message, MessageSource};
use sid_shared::Language;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog file looked up relative to the working directory
pub const CATALOG_PATH: &str = "i18n/messages.toml";

const EMBEDDED_CATALOG: &str = include_str!("../../i18n/messages.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedMessage {
    pub ja: String,
    pub en: String,
}

impl LocalizedMessage {
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Japanese => &self.ja,
            Language::English => &self.en,
        }
    }
}

/// Client-facing and operational message templates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageCatalog {
    #[serde(default)]
    pub response: HashMap<String, LocalizedMessage>,
    #[serde(default)]
    pub log: HashMap<String, LocalizedMessage>,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read message catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse message catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

impl MessageCatalog {
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml(EMBEDDED_CATALOG)
    }

    /// Raw template for `key`, searching response messages first
    pub fn template(&self, key: &str, language: Language) -> Option<&str> {
        self.response
            .get(key)
            .or_else(|| self.log.get(key))
            .map(|message| message.text(language))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.response.contains_key(key) || self.log.contains_key(key)
    }
}

impl MessageSource for MessageCatalog {
    fn message(&self, key: &str, params: &[String], language: Language) -> String {
        match self.template(key, language) {
            Some(template) => format_message(template, params),
            None => key.to_string(),
        }
    }
}

/// Process-wide catalog, read once on first use
pub static MESSAGES: Lazy<MessageCatalog> = Lazy::new(load_messages);

fn load_messages() -> MessageCatalog {
    // Try the file next to the binary first, fall back to the embedded copy
    let path = Path::new(CATALOG_PATH);
    if path.exists() {
        match MessageCatalog::load(path) {
            Ok(catalog) => return catalog,
            Err(e) => tracing::warn!("Ignoring {}: {}", CATALOG_PATH, e),
        }
    }

    MessageCatalog::embedded().unwrap_or_else(|e| {
        tracing::error!("Embedded message catalog is invalid: {}", e);
        MessageCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = MessageCatalog::embedded().unwrap();
        assert!(catalog.contains("error.api.badrequest"));
        assert!(catalog.contains("API_LOG_INFO0002"));
    }

    #[test]
    fn test_message_rendering() {
        let catalog = MessageCatalog::embedded().unwrap();
        let message = catalog.message(
            "error.api.notfound",
            &["siteId=abc".to_string()],
            Language::English,
        );
        assert_eq!(message, "The requested resource does not exist. siteId=abc");
    }

    #[test]
    fn test_missing_key_renders_as_key() {
        let catalog = MessageCatalog::default();
        assert_eq!(
            catalog.message("error.api.unknown", &[], Language::Japanese),
            "error.api.unknown"
        );
    }
}
