pub mod language;

pub use language::LanguageMiddleware;
