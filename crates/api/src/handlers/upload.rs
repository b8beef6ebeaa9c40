//! Image upload proxy.
//!
//! The multipart `file` field is forwarded unchanged to `IMAGE_HOST_URL`; the
//! host's status and JSON body are relayed back to the client.

use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqwest::multipart::{Form, Part};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const FILE_FIELD: &str = "file";

/// POST /upload
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let target = state
        .config
        .image_host_url
        .as_deref()
        .ok_or_else(|| AppError::InternalError("IMAGE_HOST_URL not configured".into()))?;

    let mut part = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let mime = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        let mut p = Part::bytes(bytes.to_vec()).file_name(file_name);
        if let Some(mime) = mime {
            p = p
                .mime_str(&mime)
                .map_err(|e| AppError::BadRequest(format!("Invalid content type: {e}")))?;
        }
        part = Some((p, bytes.len()));
        break;
    }

    let (part, size) =
        part.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".into()))?;

    let upstream = state
        .http
        .post(target)
        .multipart(Form::new().part(FILE_FIELD, part))
        .send()
        .await
        .map_err(|e| AppError::BadGateway(format!("Image host unreachable: {e}")))?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let body = upstream
        .bytes()
        .await
        .map_err(|e| AppError::BadGateway(format!("Failed to read image host response: {e}")))?;

    tracing::info!(size, status = status.as_u16(), "Upload forwarded to image host");

    Ok((status, [(CONTENT_TYPE, "application/json")], body).into_response())
}
