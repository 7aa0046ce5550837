use serde::{Deserialize, Serialize};
use sid_core::field_access;

/// Body of `POST /api/v1/spatial-ids/search`
///
/// Exactly one of `spatialIds` and `polygon` must be given. `polygon` lists
/// alternating latitude and longitude values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub spatial_ids: Option<Vec<String>>,
    pub polygon: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub updated_since: Option<String>,
    pub limit: Option<i64>,
}

field_access!(SearchRequest {
    "spatialIds" => spatial_ids,
    "polygon" => polygon,
    "startDate" => start_date,
    "endDate" => end_date,
    "updatedSince" => updated_since,
    "limit" => limit,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Requested IDs in canonical form
    pub spatial_ids: Vec<String>,
    /// Number of polygon vertices
    pub vertex_count: usize,
    pub limit: Option<i64>,
}
