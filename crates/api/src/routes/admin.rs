//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin, analytics, audit, booking, content, eco_points, experience, marketplace, media,
    provider,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// POST   /create-admin                 -> create_admin
/// POST   /upload-media                 -> upload_media (multipart)
/// GET    /media                        -> list_media
///
/// GET    /users                        -> list_users (?role=)
/// PUT    /users/{id}/role              -> update_role
/// PUT    /users/{id}/active            -> set_active
///
/// GET    /bookings                     -> admin_list_bookings (?status=)
/// PUT    /bookings/{id}/status         -> update_booking_status
///
/// GET    /experiences                  -> admin_list_experiences
/// POST   /experiences                  -> create_experience
/// PUT    /experiences/{id}             -> update_experience
/// DELETE /experiences/{id}             -> delete_experience
/// POST   /experiences/{id}/slots       -> create_slot
/// PUT    /slots/{id}                   -> update_slot
///
/// GET    /marketplace                  -> admin_list_items
/// POST   /marketplace                  -> create_item
/// PUT    /marketplace/{id}             -> update_item
/// DELETE /marketplace/{id}             -> delete_item
///
/// GET    /providers                    -> list_providers (?status=)
/// PUT    /providers/{id}/verification  -> set_verification
///
/// PUT    /content/{key}                -> upsert_content
///
/// GET    /eco-points/config            -> get_config
/// PUT    /eco-points/config            -> update_config
/// POST   /eco-points/reconcile/{user_id} -> reconcile
///
/// GET    /analytics                    -> summary
/// GET    /audit                        -> list_audit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-admin", post(admin::create_admin))
        .route("/upload-media", post(media::upload_media))
        .route("/media", get(media::list_media))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::update_role))
        .route("/users/{id}/active", put(admin::set_active))
        .route("/bookings", get(booking::admin_list_bookings))
        .route("/bookings/{id}/status", put(booking::update_booking_status))
        .route(
            "/experiences",
            get(experience::admin_list_experiences).post(experience::create_experience),
        )
        .route(
            "/experiences/{id}",
            put(experience::update_experience).delete(experience::delete_experience),
        )
        .route("/experiences/{id}/slots", post(experience::create_slot))
        .route("/slots/{id}", put(experience::update_slot))
        .route(
            "/marketplace",
            get(marketplace::admin_list_items).post(marketplace::create_item),
        )
        .route(
            "/marketplace/{id}",
            put(marketplace::update_item).delete(marketplace::delete_item),
        )
        .route("/providers", get(provider::list_providers))
        .route("/providers/{id}/verification", put(provider::set_verification))
        .route("/content/{key}", put(content::upsert_content))
        .route(
            "/eco-points/config",
            get(eco_points::get_config).put(eco_points::update_config),
        )
        .route(
            "/eco-points/reconcile/{user_id}",
            post(eco_points::reconcile),
        )
        .route("/analytics", get(analytics::summary))
        .route("/audit", get(audit::list_audit))
}
