//! Tests for API error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::Value;

use super::ApiError;
use crate::db::DbError;

async fn body_of(err: ApiError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn validation_error_is_400_with_reason() {
    let (status, body) = body_of(ApiError::Validation("name is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn not_found_is_404_with_fixed_message() {
    let (status, body) = body_of(ApiError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let (status, body) = body_of(ApiError::Internal("socket closed".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[test]
fn db_errors_map_to_api_errors() {
    let not_found = ApiError::from(DbError::NotFound {
        entity_type: "Todo".to_string(),
        id: "x".to_string(),
    });
    assert!(matches!(not_found, ApiError::NotFound));

    let invalid = ApiError::from(DbError::InvalidId {
        id: "x".to_string(),
    });
    assert!(matches!(invalid, ApiError::Validation(ref m) if m == "Invalid todo id: x"));

    let uninitialized = ApiError::from(DbError::NotInitialized);
    assert!(matches!(uninitialized, ApiError::Internal(_)));

    let connection = ApiError::from(DbError::Connection {
        message: "refused".to_string(),
    });
    assert_eq!(connection.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
