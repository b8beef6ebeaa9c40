//! Shared response envelope for API handlers.
//!
//! Every response body is `{ "code": ..., "data": ..., "msg": ... }`, with
//! `total` and `page` added for paginated lists. Errors use the same shape
//! with `data: null` (see [`crate::error::AppError`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Envelope `code` for any successful response, including creates.
pub const SUCCESS_CODE: u16 = 200;

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub data: T,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            data,
            msg: "success".to_string(),
            total: None,
            page: None,
        }
    }

    /// A page of results with the total item count and current page number.
    pub fn paged(data: T, total: i64, page: i64) -> Self {
        Self {
            total: Some(total),
            page: Some(page),
            ..Self::success(data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `201 Created` with the standard success envelope.
pub fn created<T: Serialize>(data: T) -> (StatusCode, ApiResponse<T>) {
    (StatusCode::CREATED, ApiResponse::success(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_paging_fields() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["msg"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("total").is_none());
        assert!(json.get("page").is_none());
    }

    #[test]
    fn paged_includes_total_and_page() {
        let json = serde_json::to_value(ApiResponse::paged(Vec::<u8>::new(), 0, 3)).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["page"], 3);
    }

    #[test]
    fn created_uses_201_with_success_code() {
        let (status, body) = created("x");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.code, SUCCESS_CODE);
    }
}
