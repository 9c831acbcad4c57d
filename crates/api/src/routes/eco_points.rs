//! Route definitions for the caller's eco-points.

use axum::routing::get;
use axum::Router;

use crate::handlers::eco_points;
use crate::state::AppState;

/// Routes mounted at `/eco-points`. All require authentication.
///
/// ```text
/// GET /balance        -> get_balance
/// GET /transactions   -> list_transactions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance", get(eco_points::get_balance))
        .route("/transactions", get(eco_points::list_transactions))
}
