//! Handlers for marketplace listings (handicrafts and homestays).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ecotour_core::audit::{actions, objects};
use ecotour_core::catalog::{
    validate_listing_pricing, validate_marketplace_type, validate_price, validate_title,
};
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::marketplace::{
    CreateMarketplaceItem, MarketplaceItem, MarketplaceQuery, UpdateMarketplaceItem,
};
use ecotour_db::repositories::MarketplaceRepo;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn item_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MarketplaceItem",
        id,
    })
}

fn validate_stock(stock_quantity: Option<i32>) -> Result<(), CoreError> {
    match stock_quantity {
        Some(n) if n < 0 => Err(CoreError::Validation(
            "stock_quantity must not be negative".into(),
        )),
        _ => Ok(()),
    }
}

/// GET /api/v1/marketplace
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<MarketplaceQuery>,
) -> AppResult<Json<DataResponse<Vec<MarketplaceItem>>>> {
    if let Some(item_type) = &params.item_type {
        validate_marketplace_type(item_type)?;
    }
    let items = MarketplaceRepo::list_public(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/marketplace/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MarketplaceItem>>> {
    let item = MarketplaceRepo::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// GET /api/v1/admin/marketplace
pub async fn admin_list_items(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<MarketplaceItem>>>> {
    let items = MarketplaceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/marketplace
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateMarketplaceItem>,
) -> AppResult<(StatusCode, Json<DataResponse<MarketplaceItem>>)> {
    validate_title(&input.title)?;
    validate_listing_pricing(&input.item_type, input.price, input.price_per_night)?;
    validate_stock(input.stock_quantity)?;

    let mut tx = state.pool.begin().await?;
    let item = MarketplaceRepo::create(&mut *tx, &input, admin.user_id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::CREATE,
        objects::MARKETPLACE_ITEM,
        item.id,
        json!({ "type": item.item_type, "title": item.title }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.user_id, item_id = item.id, "Marketplace item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/marketplace/{id}
///
/// The listing type is fixed at creation; pricing is re-checked against it.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMarketplaceItem>,
) -> AppResult<Json<DataResponse<MarketplaceItem>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(price) = input.price {
        validate_price("price", price)?;
    }
    if let Some(price) = input.price_per_night {
        validate_price("price_per_night", price)?;
    }
    validate_stock(input.stock_quantity)?;

    let mut tx = state.pool.begin().await?;
    let item = MarketplaceRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    validate_listing_pricing(&item.item_type, item.price, item.price_per_night)?;

    audit::record(
        &mut tx,
        admin.user_id,
        actions::UPDATE,
        objects::MARKETPLACE_ITEM,
        id,
        json!({
            "title": input.title,
            "price": input.price,
            "price_per_night": input.price_per_night,
            "stock_quantity": input.stock_quantity,
            "is_active": input.is_active,
        }),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/marketplace/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    let item = MarketplaceRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    if MarketplaceRepo::has_bookings(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Marketplace item {id} has bookings; deactivate it instead"
        ))));
    }
    MarketplaceRepo::delete(&mut *tx, id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::DELETE,
        objects::MARKETPLACE_ITEM,
        id,
        json!({ "type": item.item_type, "title": item.title }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.user_id, item_id = id, "Marketplace item deleted");
    Ok(StatusCode::NO_CONTENT)
}
