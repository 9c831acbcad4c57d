//! Handlers for admin account and user management.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ecotour_core::audit::{actions, objects};
use ecotour_core::error::CoreError;
use ecotour_core::roles::{normalize_role, ROLE_ADMIN};
use ecotour_core::types::DbId;
use ecotour_db::models::profile::Profile;
use ecotour_db::repositories::ProfileRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::audit;
use crate::auth::accounts::{create_account, NewAccount};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PaginationParams, UserListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/create-admin`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedAdmin {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct CreateAdminResponse {
    pub success: bool,
    pub user: CreatedAdmin,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/create-admin
///
/// Create another administrator. The identity is removed again if the
/// profile insert fails.
pub async fn create_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<CreateAdminResponse>)> {
    let profile = create_account(
        &state,
        NewAccount {
            email: &input.email,
            password: &input.password,
            full_name: &input.full_name,
            phone: None,
            role: ROLE_ADMIN,
        },
        Some(admin.user_id),
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, new_admin_id = profile.id, "Admin created");

    Ok((
        StatusCode::CREATED,
        Json(CreateAdminResponse {
            success: true,
            user: CreatedAdmin {
                id: profile.id,
                email: profile.email,
                full_name: profile.full_name,
                role: profile.role,
            },
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let role = params.role.as_deref().map(normalize_role).transpose()?;
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let users = ProfileRepo::list(&state.pool, role, limit, offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let role = normalize_role(&input.role)?;
    if id == admin.user_id && role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot remove their own admin role".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;

    let before = ProfileRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    let profile = ProfileRepo::update_role(&mut *tx, id, role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;

    audit::record(
        &mut tx,
        admin.user_id,
        actions::ROLE_CHANGE,
        objects::PROFILE,
        id,
        json!({ "from": before.role, "to": profile.role }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.user_id, user_id = id, role, "User role changed");
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/admin/users/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    if id == admin.user_id && !input.is_active {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot deactivate themselves".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;

    let profile = ProfileRepo::set_active(&mut *tx, id, input.is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;

    let action = if input.is_active {
        actions::ACTIVATE
    } else {
        actions::DEACTIVATE
    };
    audit::record(
        &mut tx,
        admin.user_id,
        action,
        objects::PROFILE,
        id,
        json!({ "is_active": input.is_active }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = id,
        is_active = input.is_active,
        "User activation changed",
    );
    Ok(Json(DataResponse { data: profile }))
}
