//! Type definitions shared by every crate
//!
//! - `language` - Internationalization and language types

pub mod language;

pub use language::Language;
