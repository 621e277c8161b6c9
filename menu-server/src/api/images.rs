//! Image API — upload dish images to S3, stream them back when
//! presigned URLs are not usable
//!
//! POST /api/upload — multipart upload → validate → JPEG compress →
//! SHA256 → S3. Returns `{ path, url }` for storing in the library.

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use shared::error::AppError;

use crate::error::ServiceResult;
use crate::images::{MAX_UPLOAD_BYTES, is_valid_key};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_image))
        .route("/api/image/{*key}", get(stream_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024))
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
    pub url: String,
}

/// POST /api/upload - upload a dish image
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServiceResult<Json<UploadResponse>> {
    // Extract file from multipart
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::validation("No file uploaded"))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file").into());
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::validation(format!(
            "File too large: {} bytes (max {MAX_UPLOAD_BYTES})",
            data.len()
        ))
        .into());
    }

    let path = state.images.store(&data).await?;
    let url = state
        .images
        .resolve(&path)
        .await
        .unwrap_or_else(|| path.clone());
    Ok(Json(UploadResponse { path, url }))
}

/// GET /api/image/{key} - stream an object from the bucket
pub async fn stream_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Response> {
    if !is_valid_key(&key) {
        return Err(AppError::validation("Invalid path").into());
    }
    let (bytes, content_type) = state.images.fetch(&key).await?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        bytes,
    )
        .into_response())
}
