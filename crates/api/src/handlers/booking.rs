//! Handlers for bookings.
//!
//! The workflow itself lives in [`crate::booking`]; these handlers only
//! authenticate, scope reads to the caller, and shape responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ecotour_core::booking::BookingStatus;
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::booking::{Booking, BookingQuery};
use ecotour_db::repositories::BookingRepo;
use serde::Deserialize;

use crate::booking::{create_booking as admit_booking, transition_booking, CreateBookingRequest};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let booking = admit_booking(&state.pool, auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings/mine
pub async fn list_my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/{id}
///
/// Other users' bookings are reported as missing.
pub async fn get_my_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|b| b.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(DataResponse { data: booking }))
}

/// GET /api/v1/admin/bookings
pub async fn admin_list_bookings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<BookingQuery>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let status = params
        .status
        .as_deref()
        .map(BookingStatus::parse)
        .transpose()?;
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let bookings =
        BookingRepo::list(&state.pool, status.map(BookingStatus::as_str), limit, offset).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// PUT /api/v1/admin/bookings/{id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let to = BookingStatus::parse(input.status.trim())?;
    let booking = transition_booking(&state.pool, admin.user_id, id, to).await?;
    Ok(Json(DataResponse { data: booking }))
}
