//! Public catalog routes: experiences, marketplace listings and site text.

use axum::routing::get;
use axum::Router;

use crate::handlers::{content, experience, marketplace};
use crate::state::AppState;

/// Routes mounted at `/experiences`.
///
/// ```text
/// GET  /                 -> list_experiences
/// GET  /{id}             -> get_experience
/// GET  /{id}/slots       -> list_slots
/// GET  /{id}/reviews     -> list_reviews
/// POST /{id}/reviews     -> create_review (auth required)
/// ```
pub fn experience_router() -> Router<AppState> {
    Router::new()
        .route("/", get(experience::list_experiences))
        .route("/{id}", get(experience::get_experience))
        .route("/{id}/slots", get(experience::list_slots))
        .route(
            "/{id}/reviews",
            get(experience::list_reviews).post(experience::create_review),
        )
}

/// Routes mounted at `/marketplace`.
///
/// ```text
/// GET /        -> list_items (?type=handicraft|homestay)
/// GET /{id}    -> get_item
/// ```
pub fn marketplace_router() -> Router<AppState> {
    Router::new()
        .route("/", get(marketplace::list_items))
        .route("/{id}", get(marketplace::get_item))
}

/// Routes mounted at `/content`.
pub fn content_router() -> Router<AppState> {
    Router::new().route("/", get(content::list_content))
}
