use actix_web::{web, HttpRequest, HttpResponse};
use once_cell::sync::Lazy;
use sid_core::errors::{ApiError, ApiResult};
use sid_core::logging::{Invocation, MethodBoundaryLogger};
use sid_core::validation::{
    FieldConstraint, FieldRule, RuleConfigError, RuleSet, SpatialId, ZoomRule,
};

use crate::config::ErrorConfig;
use crate::dto::search::{SearchRequest, SearchResponse};
use crate::handlers::error::ApiFailure;
use crate::i18n::MESSAGES;

/// Coarsest zoom a search may cover
pub const SEARCH_ZOOM_LOWER: u32 = 15;
/// Finest zoom a search may name
pub const SEARCH_ZOOM_UPPER: u32 = 25;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shape checks first; zoom and area only once every ID parses
static SEARCH_RULES: Lazy<Result<RuleSet<SearchRequest>, RuleConfigError>> = Lazy::new(|| {
    let optional_date = FieldConstraint::Date {
        format: DATE_FORMAT.to_string(),
        allow_null: true,
        allow_empty: false,
    };

    RuleSet::builder()
        .rule(FieldRule::exclusive_or("spatialIds", "polygon"))
        .rule(FieldRule::conditional_mandatory("endDate", "startDate"))
        .field("spatialIds", FieldConstraint::SpatialId(ZoomRule::Positive))
        .field("polygon", FieldConstraint::MinimumVertices)
        .field("polygon", FieldConstraint::Decimal)
        .field("startDate", optional_date.clone())
        .field("endDate", optional_date)
        .field("updatedSince", FieldConstraint::Timestamp)
        .field("limit", FieldConstraint::Positive)
        .next_stage()
        .field(
            "spatialIds",
            FieldConstraint::ZoomRange {
                lower: SEARCH_ZOOM_LOWER,
                upper: SEARCH_ZOOM_UPPER,
            },
        )
        .field(
            "spatialIds",
            FieldConstraint::AreaBound {
                lower: SEARCH_ZOOM_LOWER,
                upper: SEARCH_ZOOM_UPPER,
            },
        )
        .build()
});

/// Handler for POST /api/v1/spatial-ids/search
///
/// Validates the search conditions and answers with the normalized request.
///
/// # Request Body
///
/// ```json
/// {
///     "spatialIds": ["20/0/931176/412938"],
///     "startDate": "2024-04-01",
///     "limit": 100
/// }
/// ```
///
/// ## Errors
/// Invalid conditions answer 400 with the rejected fields in the message.
pub async fn search(
    req: HttpRequest,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, ApiFailure> {
    let request = request.into_inner();
    let invocation = Invocation::new("SpatialSearchController", "search").arg("request", &request);
    let log_language = req
        .app_data::<web::Data<ErrorConfig>>()
        .map(|config| config.default_language)
        .unwrap_or_default();
    let logger = MethodBoundaryLogger::new(&*MESSAGES).with_language(log_language);

    logger
        .invoke_async(&invocation, async { run_search(&request) })
        .await
        .map(|response| HttpResponse::Ok().json(response))
        .map_err(|e| ApiFailure::from_request(e, &req))
}

fn run_search(request: &SearchRequest) -> ApiResult<SearchResponse> {
    let rules = SEARCH_RULES
        .as_ref()
        .map_err(|e| ApiError::Unexpected(anyhow::anyhow!("search rules: {}", e)))?;
    rules.validate(request)?;

    let spatial_ids = request
        .spatial_ids
        .iter()
        .flatten()
        .map(|raw| {
            raw.parse::<SpatialId>()
                .map(|id| id.to_string())
                .map_err(|e| ApiError::Unexpected(e.into()))
        })
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(SearchResponse {
        spatial_ids,
        vertex_count: request.polygon.as_ref().map_or(0, |p| p.len() / 2),
        limit: request.limit,
    })
}
