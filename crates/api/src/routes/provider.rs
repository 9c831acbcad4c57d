//! Route definitions for provider self-registration.

use axum::routing::post;
use axum::Router;

use crate::handlers::provider;
use crate::state::AppState;

/// Routes mounted at `/providers`.
///
/// ```text
/// POST /   -> register_provider (provider role)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(provider::register_provider))
}
