pub mod error;

pub use error::{classify, ApiFailure, Classification};
