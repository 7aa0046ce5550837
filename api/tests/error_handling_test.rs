//! Integration tests for error classification and error responses

use actix_web::http::StatusCode;
use actix_web::{body, ResponseError};
use sid_api::config::ErrorConfig;
use sid_api::handlers::error::{
    build_response, classify, embed_from_map, embed_from_violations, ApiFailure,
};
use sid_api::i18n::MESSAGES;
use sid_core::errors::{ApiError, EmbeddingPairs, Severity};
use sid_core::validation::{FieldRule, ViolationSet};
use sid_shared::{ErrorResponse, Language};

struct Payload {
    site_id: Option<String>,
    area_id: Option<String>,
}

sid_core::field_access!(Payload {
    "siteId" => site_id,
    "areaId" => area_id,
});

fn violations() -> ViolationSet {
    let payload = Payload {
        site_id: Some("abc".to_string()),
        area_id: Some("42".to_string()),
    };
    sid_core::validation::evaluate(&payload, &[FieldRule::exclusive_or("siteId", "areaId")])
}

#[test]
fn test_status_table() {
    let cases = [
        (ApiError::from(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::internal_api_calling("tiles"), StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::UriNotFound, StatusCode::NOT_FOUND),
        (ApiError::not_found(EmbeddingPairs::new()), StatusCode::NOT_FOUND),
        (ApiError::param_error(ViolationSet::new()), StatusCode::BAD_REQUEST),
        (ApiError::duplicate_key("siteId"), StatusCode::CONFLICT),
        (ApiError::DataUpdateFailure, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::AccessDenied, StatusCode::FORBIDDEN),
        (ApiError::DataRange, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::ExclusiveError, StatusCode::CONFLICT),
        (
            ApiError::access_history_update(EmbeddingPairs::new(), "timeout"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        let classification = classify(&error, &*MESSAGES, Language::English);
        assert_eq!(classification.status, status, "{:?}", error);
    }
}

#[test]
fn test_not_found_embeds_path_params() {
    let error = ApiError::not_found(EmbeddingPairs::new().with("siteId", "abc"));
    let classification = classify(&error, &*MESSAGES, Language::English);

    assert_eq!(classification.status, StatusCode::NOT_FOUND);
    assert_eq!(classification.severity, Severity::UserFault);
    assert!(classification.message.contains("siteId=abc"));
}

#[test]
fn test_unknown_failure_is_generic_500() {
    let error = ApiError::from(anyhow::anyhow!("boom"));
    let classification = classify(&error, &*MESSAGES, Language::English);

    assert_eq!(classification.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(classification.severity, Severity::Error);
    assert_eq!(classification.message, "An internal server error occurred.");
    assert!(!classification.message.contains("boom"));
}

#[test]
fn test_param_error_message() {
    let error = ApiError::param_error(violations());
    let classification = classify(&error, &*MESSAGES, Language::English);

    assert_eq!(
        classification.message,
        "Invalid request parameters. Fields: siteId,areaId Values: siteId=abc,areaId=42"
    );
}

#[test]
fn test_embedding_helpers() {
    let [names, pairs] = embed_from_violations(&violations());
    assert_eq!(names, "siteId,areaId");
    assert_eq!(pairs, "siteId=abc,areaId=42");

    let embedding = EmbeddingPairs::new().with("b", 1).with("a", 2);
    assert_eq!(embed_from_map(&embedding), ["b,a".to_string(), "b=1,a=2".to_string()]);

    assert_eq!(embed_from_violations(&ViolationSet::new()), [String::new(), String::new()]);
    assert_eq!(embed_from_map(&EmbeddingPairs::new()), [String::new(), String::new()]);
}

#[test]
fn test_messages_follow_language() {
    let error = ApiError::AccessDenied;
    let english = classify(&error, &*MESSAGES, Language::English);
    let japanese = classify(&error, &*MESSAGES, Language::Japanese);

    assert_eq!(english.status, japanese.status);
    assert_ne!(english.message, japanese.message);
    assert_eq!(japanese.message, "アクセス権限がありません。");
}

#[test]
fn test_build_response() {
    let config = ErrorConfig::default();
    let response = build_response(StatusCode::CONFLICT, "dup".to_string(), &config);

    assert_eq!(response.code, "[infra-dx] Conflict");
    assert_eq!(response.message, "dup");
    assert_eq!(response.detail.len(), "2025/01/31 09:15:00".len());
    assert_eq!(&response.detail[4..5], "/");

    let custom = ErrorConfig {
        code_prefix: "[test]".to_string(),
        detail_format: "%Y".to_string(),
        ..ErrorConfig::default()
    };
    let response = build_response(StatusCode::FORBIDDEN, "no".to_string(), &custom);
    assert_eq!(response.code, "[test] Forbidden");
    assert_eq!(response.detail.len(), 4);
}

#[actix_rt::test]
async fn test_failure_renders_error_body() {
    let mut failure = ApiFailure::new(ApiError::duplicate_key("siteId"));
    failure.language = Language::English;

    assert_eq!(failure.status_code(), StatusCode::CONFLICT);

    let response = failure.error_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = body::to_bytes(response.into_body()).await.unwrap();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.code, "[infra-dx] Conflict");
    assert_eq!(body.message, "The key is already registered. siteId");
}
