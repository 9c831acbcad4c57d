//! Route definitions for the caller's bookings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`. All require authentication.
///
/// ```text
/// POST /        -> create_booking
/// GET  /mine    -> list_my_bookings
/// GET  /{id}    -> get_my_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(booking::create_booking))
        .route("/mine", get(booking::list_my_bookings))
        .route("/{id}", get(booking::get_my_booking))
}
