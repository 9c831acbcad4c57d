pub mod admin;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod eco_points;
pub mod health;
pub mod provider;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current profile (auth)
///
/// /experiences                                     list (public)
/// /experiences/{id}                                get (public)
/// /experiences/{id}/slots                          open future slots (public)
/// /experiences/{id}/reviews                        list (public), create (auth)
///
/// /marketplace                                     list (public, ?type=)
/// /marketplace/{id}                                get (public)
///
/// /content                                         site text (public)
///
/// /bookings                                        create (auth)
/// /bookings/mine                                   own bookings (auth)
/// /bookings/{id}                                   own booking (auth)
///
/// /eco-points/balance                              own balance (auth)
/// /eco-points/transactions                         own ledger (auth)
///
/// /providers                                       register (provider role)
///
/// /admin/...                                       see [`admin::router`]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/experiences", catalog::experience_router())
        .nest("/marketplace", catalog::marketplace_router())
        .nest("/content", catalog::content_router())
        .nest("/bookings", booking::router())
        .nest("/eco-points", eco_points::router())
        .nest("/providers", provider::router())
        .nest("/admin", admin::router())
}
