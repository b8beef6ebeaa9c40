//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly and need no server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use blog_api::error::AppError;
use blog_core::error::CoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_uses_error_envelope() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);
    assert!(json["data"].is_null());
    assert_eq!(json["msg"], "Category with id 42 not found");
}

#[tokio::test]
async fn validation_maps_to_400() {
    let err = AppError::Core(CoreError::Validation("Category name is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
    assert_eq!(json["msg"], "Category name is required");
}

#[tokio::test]
async fn bad_request_keeps_message() {
    let (status, json) =
        error_to_response(AppError::BadRequest("Missing authorization code".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["msg"], "Missing authorization code");
}

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], 401);

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("owner only".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], 403);
}

#[tokio::test]
async fn conflict_maps_to_409() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("duplicate".into()))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], 409);
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], 500);
    let msg = json["msg"].as_str().unwrap();
    assert!(!msg.contains("secret"), "internal details must not leak: {msg}");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pool_timeout_maps_to_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["msg"], "An internal error occurred");
}

#[tokio::test]
async fn bad_gateway_maps_to_502() {
    let (status, json) =
        error_to_response(AppError::BadGateway("Image host unreachable".into())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], 502);
}
