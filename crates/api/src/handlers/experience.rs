//! Handlers for experiences, their slots and reviews.
//!
//! Public reads only see active experiences and open, future slots. Admin
//! handlers see everything and audit every mutation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use ecotour_core::audit::{actions, objects};
use ecotour_core::catalog::{
    validate_category, validate_price, validate_rating, validate_slot_capacity, validate_title,
};
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::experience::{
    CreateExperience, Experience, ExperienceQuery, UpdateExperience,
};
use ecotour_db::models::review::{CreateReview, Review};
use ecotour_db::models::slot::{CreateSlot, ExperienceSlot, UpdateSlot};
use ecotour_db::repositories::{ExperienceRepo, ProviderRepo, ReviewRepo, SlotRepo};
use serde_json::json;
use sqlx::PgConnection;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn experience_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Experience",
        id,
    })
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/experiences
pub async fn list_experiences(
    State(state): State<AppState>,
    Query(params): Query<ExperienceQuery>,
) -> AppResult<Json<DataResponse<Vec<Experience>>>> {
    if let Some(category) = &params.category {
        validate_category(category)?;
    }
    let experiences = ExperienceRepo::list_public(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: experiences }))
}

/// GET /api/v1/experiences/{id}
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Experience>>> {
    let experience = ExperienceRepo::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| experience_not_found(id))?;
    Ok(Json(DataResponse { data: experience }))
}

/// GET /api/v1/experiences/{id}/slots
///
/// Open slots dated today or later.
pub async fn list_slots(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ExperienceSlot>>>> {
    ExperienceRepo::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| experience_not_found(id))?;
    let today = Utc::now().date_naive();
    let slots = SlotRepo::list_available(&state.pool, id, today).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// GET /api/v1/experiences/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = ReviewRepo::list_for_experience(&state.pool, id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/experiences/{id}/reviews
///
/// One review per user and experience; a second one is a conflict.
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    validate_rating(input.rating)?;
    ExperienceRepo::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| experience_not_found(id))?;

    let review = ReviewRepo::create(&state.pool, id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/experiences
pub async fn admin_list_experiences(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Experience>>>> {
    let experiences = ExperienceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: experiences }))
}

/// POST /api/v1/admin/experiences
pub async fn create_experience(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateExperience>,
) -> AppResult<(StatusCode, Json<DataResponse<Experience>>)> {
    validate_title(&input.title)?;
    validate_category(&input.category)?;
    validate_price("price", input.price)?;

    let mut tx = state.pool.begin().await?;
    ensure_provider_exists(&mut tx, input.provider_id).await?;

    let experience = ExperienceRepo::create(&mut *tx, &input, admin.user_id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::CREATE,
        objects::EXPERIENCE,
        experience.id,
        json!({
            "title": experience.title,
            "category": experience.category,
            "price": experience.price,
        }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        experience_id = experience.id,
        "Experience created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: experience })))
}

/// PUT /api/v1/admin/experiences/{id}
pub async fn update_experience(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExperience>,
) -> AppResult<Json<DataResponse<Experience>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    if let Some(price) = input.price {
        validate_price("price", price)?;
    }

    let mut tx = state.pool.begin().await?;
    ensure_provider_exists(&mut tx, input.provider_id).await?;

    let experience = ExperienceRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or_else(|| experience_not_found(id))?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::UPDATE,
        objects::EXPERIENCE,
        id,
        json!({
            "title": input.title,
            "category": input.category,
            "price": input.price,
            "is_active": input.is_active,
            "is_featured": input.is_featured,
            "provider_id": input.provider_id,
        }),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: experience }))
}

/// DELETE /api/v1/admin/experiences/{id}
///
/// Refused while any booking references the experience; deactivate it instead.
pub async fn delete_experience(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    let experience = ExperienceRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| experience_not_found(id))?;
    if ExperienceRepo::has_bookings(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Experience {id} has bookings; deactivate it instead"
        ))));
    }
    ExperienceRepo::delete(&mut *tx, id).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::DELETE,
        objects::EXPERIENCE,
        id,
        json!({ "title": experience.title }),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(admin_id = admin.user_id, experience_id = id, "Experience deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/experiences/{id}/slots
pub async fn create_slot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(experience_id): Path<DbId>,
    Json(input): Json<CreateSlot>,
) -> AppResult<(StatusCode, Json<DataResponse<ExperienceSlot>>)> {
    validate_slot_capacity(input.max_capacity, 0)?;
    if let Some(price) = input.price_override {
        validate_price("price_override", price)?;
    }

    let mut tx = state.pool.begin().await?;
    ExperienceRepo::find_by_id(&mut *tx, experience_id)
        .await?
        .ok_or_else(|| experience_not_found(experience_id))?;

    let slot = SlotRepo::create(&mut *tx, experience_id, &input).await?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::CREATE,
        objects::EXPERIENCE_SLOT,
        slot.id,
        json!({
            "experience_id": experience_id,
            "slot_date": slot.slot_date,
            "max_capacity": slot.max_capacity,
        }),
    )
    .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// PUT /api/v1/admin/slots/{id}
///
/// The slot row is locked so the capacity check cannot race a reservation.
pub async fn update_slot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlot>,
) -> AppResult<Json<DataResponse<ExperienceSlot>>> {
    if let Some(price) = input.price_override {
        validate_price("price_override", price)?;
    }

    let mut tx = state.pool.begin().await?;
    let current = SlotRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ExperienceSlot",
            id,
        }))?;
    validate_slot_capacity(
        input.max_capacity.unwrap_or(current.max_capacity),
        current.booked_capacity,
    )?;

    let slot = SlotRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ExperienceSlot",
            id,
        }))?;
    audit::record(
        &mut tx,
        admin.user_id,
        actions::UPDATE,
        objects::EXPERIENCE_SLOT,
        id,
        json!({
            "max_capacity": { "from": current.max_capacity, "to": slot.max_capacity },
            "is_available": { "from": current.is_available, "to": slot.is_available },
            "slot_date": slot.slot_date,
        }),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: slot }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_provider_exists(
    conn: &mut PgConnection,
    provider_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(provider_id) = provider_id {
        ProviderRepo::find_by_id(&mut *conn, provider_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Provider",
                id: provider_id,
            }))?;
    }
    Ok(())
}
