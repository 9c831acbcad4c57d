//! Handlers for eco-points balances, history and configuration.

use axum::extract::{Path, Query, State};
use axum::Json;
use ecotour_core::audit::{actions, objects};
use ecotour_core::eco_points::EcoPointsRules;
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::eco_points::{
    EcoPointsConfig, EcoPointsTransaction, Reconciliation, UpdateEcoPointsConfig,
};
use ecotour_db::repositories::{EcoPointsConfigRepo, EcoPointsRepo, ProfileRepo};
use serde::Serialize;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: DbId,
    pub total_points: i64,
}

/// GET /api/v1/eco-points/balance
///
/// The balance is the sum of the caller's ledger entries.
pub async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<BalanceResponse>>> {
    let total_points = EcoPointsRepo::balance(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: BalanceResponse {
            user_id: auth.user_id,
            total_points,
        },
    }))
}

/// GET /api/v1/eco-points/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<EcoPointsTransaction>>>> {
    let (limit, offset) = params.resolve();
    let transactions =
        EcoPointsRepo::list_transactions(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: transactions }))
}

/// GET /api/v1/admin/eco-points/config
pub async fn get_config(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<EcoPointsConfig>>> {
    let config = EcoPointsConfigRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: config }))
}

/// PUT /api/v1/admin/eco-points/config
///
/// The merged configuration is validated before it is written.
pub async fn update_config(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateEcoPointsConfig>,
) -> AppResult<Json<DataResponse<EcoPointsConfig>>> {
    let mut tx = state.pool.begin().await?;

    let current = EcoPointsConfigRepo::get(&mut *tx).await?.rules();
    let merged = EcoPointsRules {
        earn_multiplier: input.earn_multiplier.unwrap_or(current.earn_multiplier),
        min_booking_amount: input.min_booking_amount.unwrap_or(current.min_booking_amount),
        redeem_value: input.redeem_value.unwrap_or(current.redeem_value),
    };
    merged.validate()?;

    let config = EcoPointsConfigRepo::update(&mut *tx, &input, admin.user_id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::CONFIG_CHANGE,
        objects::ECO_POINTS_CONFIG,
        1,
        json!({ "from": current, "to": config.rules() }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        earn_multiplier = %config.earn_multiplier,
        min_booking_amount = %config.min_booking_amount,
        redeem_value = %config.redeem_value,
        "Eco-points config updated",
    );
    Ok(Json(DataResponse { data: config }))
}

/// POST /api/v1/admin/eco-points/reconcile/{user_id}
///
/// Rebuild the cached balance from the ledger and report any drift.
pub async fn reconcile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Reconciliation>>> {
    let mut tx = state.pool.begin().await?;

    ProfileRepo::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user_id,
        }))?;

    let result = EcoPointsRepo::reconcile(&mut tx, user_id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::RECONCILE,
        objects::ECO_POINTS_BALANCE,
        user_id,
        json!({
            "ledger_total": result.ledger_total,
            "cached_before": result.cached_before,
            "drift": result.drift,
        }),
    )
    .await?;
    tx.commit().await?;

    if result.drift != 0 {
        tracing::warn!(user_id, drift = result.drift, "Eco-points balance drift repaired");
    }
    Ok(Json(DataResponse { data: result }))
}
