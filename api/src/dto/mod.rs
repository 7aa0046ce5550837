pub mod search;

pub use search::{SearchRequest, SearchResponse};
