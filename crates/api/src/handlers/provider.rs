//! Handlers for provider registration and verification.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ecotour_core::audit::{actions, objects};
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::provider::{CreateProvider, Provider, ProviderQuery};
use ecotour_db::repositories::ProviderRepo;
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireProvider};
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted values of `?status=` on the admin provider list.
const PROVIDER_STATUSES: &[&str] = &["pending", "verified", "rejected"];

/// Request body for `PUT /admin/providers/{id}/verification`.
#[derive(Debug, Deserialize)]
pub struct VerificationRequest {
    pub verified: bool,
}

/// POST /api/v1/providers
///
/// A provider-role profile registers the business it runs. The record starts
/// pending verification.
pub async fn register_provider(
    State(state): State<AppState>,
    RequireProvider(profile): RequireProvider,
    Json(input): Json<CreateProvider>,
) -> AppResult<(StatusCode, Json<DataResponse<Provider>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }

    let provider = ProviderRepo::create(&state.pool, profile.id, &input).await?;
    tracing::info!(provider_id = provider.id, owner_id = profile.id, "Provider registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: provider })))
}

/// GET /api/v1/admin/providers
pub async fn list_providers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ProviderQuery>,
) -> AppResult<Json<DataResponse<Vec<Provider>>>> {
    if let Some(status) = params.status.as_deref() {
        if !PROVIDER_STATUSES.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid provider status '{status}'. Must be one of: {}",
                PROVIDER_STATUSES.join(", ")
            ))));
        }
    }
    let providers = ProviderRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: providers }))
}

/// PUT /api/v1/admin/providers/{id}/verification
pub async fn set_verification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<VerificationRequest>,
) -> AppResult<Json<DataResponse<Provider>>> {
    let mut tx = state.pool.begin().await?;

    let provider = ProviderRepo::set_verification(&mut *tx, id, input.verified)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id,
        }))?;
    let action = if input.verified {
        actions::VERIFY
    } else {
        actions::REJECT
    };
    audit::record(
        &mut tx,
        admin.user_id,
        action,
        objects::PROVIDER,
        id,
        json!({ "name": provider.name, "verified": input.verified }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        provider_id = id,
        verified = input.verified,
        "Provider verification set",
    );
    Ok(Json(DataResponse { data: provider }))
}
