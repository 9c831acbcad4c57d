//! Handlers for editable site text.

use axum::extract::{Path, State};
use axum::Json;
use ecotour_core::audit::{actions, objects};
use ecotour_core::error::CoreError;
use ecotour_db::models::cms::{CmsText, UpsertCmsText};
use ecotour_db::repositories::CmsTextRepo;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted CMS key.
const MAX_KEY_LENGTH: usize = 100;

/// GET /api/v1/content
pub async fn list_content(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CmsText>>>> {
    let texts = CmsTextRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: texts }))
}

/// PUT /api/v1/admin/content/{key}
pub async fn upsert_content(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
    Json(input): Json<UpsertCmsText>,
) -> AppResult<Json<DataResponse<CmsText>>> {
    let key = key.trim();
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Content key must be 1 to {MAX_KEY_LENGTH} characters"
        ))));
    }

    let mut tx = state.pool.begin().await?;
    let text = CmsTextRepo::upsert(&mut *tx, key, &input.value, admin.user_id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::UPDATE,
        objects::CMS_TEXT,
        key,
        json!({ "value": input.value }),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: text }))
}
