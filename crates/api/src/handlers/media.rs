//! Handlers for admin media uploads.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use chrono::Utc;
use ecotour_core::audit::{actions, objects};
use ecotour_core::error::CoreError;
use ecotour_core::retry::retry_with_backoff;
use ecotour_core::storage::{media_extension, upload_path, validate_bucket, DEFAULT_BUCKET};
use ecotour_core::types::DbId;
use ecotour_db::models::media::{CreateMedia, Media};
use ecotour_db::repositories::MediaRepo;
use serde::Serialize;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub media: Media,
}

struct UploadedFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// POST /api/v1/admin/upload-media
///
/// Multipart form with a required `file` field and an optional `bucket`
/// field (default `public-media`). The object is stored first; if the media
/// row cannot be written afterwards the object is deleted again.
pub async fn upload_media(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<UploadedFile> = None;
    let mut bucket: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::BadRequest("The 'file' field needs a file name".into())
                })?;
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(UploadedFile {
                    name: file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "bucket" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    bucket = Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let bucket = bucket.unwrap_or_else(|| DEFAULT_BUCKET.to_string());
    validate_bucket(&bucket)?;
    if file.bytes.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded file is empty".into(),
        )));
    }
    let max_bytes = state.config.storage.max_upload_bytes;
    if file.bytes.len() > max_bytes {
        return Err(AppError::Core(CoreError::Validation(format!(
            "File exceeds the {max_bytes} byte upload limit"
        ))));
    }

    let ext = media_extension(&file.name)?;
    let path = upload_path(Utc::now().timestamp_millis(), uuid::Uuid::new_v4(), &ext);

    let storage = state.storage.as_ref();
    let url = retry_with_backoff(&state.config.storage.retry_policy(), "media upload", || {
        storage.upload(&bucket, &path, &file.bytes, file.content_type.as_deref())
    })
    .await?;

    match record_upload(&state, admin.user_id, &bucket, &path, &url, &file).await {
        Ok(media) => {
            tracing::info!(
                admin_id = admin.user_id,
                media_id = media.id,
                bucket = %bucket,
                path = %path,
                size = file.bytes.len(),
                "Media uploaded",
            );
            Ok(Json(UploadResponse {
                success: true,
                url,
                media,
            }))
        }
        Err(err) => {
            if let Err(cleanup_err) = storage.delete(&bucket, &path).await {
                tracing::error!(
                    bucket = %bucket,
                    path = %path,
                    error = %cleanup_err,
                    "Failed to remove object after media insert failure",
                );
            }
            Err(err)
        }
    }
}

async fn record_upload(
    state: &AppState,
    admin_id: DbId,
    bucket: &str,
    path: &str,
    url: &str,
    file: &UploadedFile,
) -> AppResult<Media> {
    let mut tx = state.pool.begin().await?;

    let media = MediaRepo::create(
        &mut *tx,
        &CreateMedia {
            bucket: bucket.to_string(),
            path: path.to_string(),
            url: url.to_string(),
            uploaded_by: admin_id,
            meta: json!({
                "originalName": file.name,
                "size": file.bytes.len(),
                "type": file.content_type,
            }),
        },
    )
    .await?;
    audit::record(
        &mut tx,
        admin_id,
        actions::UPLOAD,
        objects::MEDIA,
        media.id,
        json!({ "bucket": bucket, "path": path, "original_name": file.name }),
    )
    .await?;

    tx.commit().await?;
    Ok(media)
}

/// GET /api/v1/admin/media
pub async fn list_media(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Media>>>> {
    let (limit, offset) = params.resolve();
    let media = MediaRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: media }))
}
