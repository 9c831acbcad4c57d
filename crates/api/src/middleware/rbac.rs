//! Role-based access control extractors.
//!
//! Roles are resolved from the `profiles` table on every request. The token's
//! role claim is never trusted, so a demoted or deactivated admin loses
//! access immediately.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ecotour_core::error::CoreError;
use ecotour_core::roles::{ROLE_ADMIN, ROLE_PROVIDER};
use ecotour_db::models::profile::Profile;
use ecotour_db::repositories::ProfileRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Load the caller's profile and require it to be active with `role`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: &str,
) -> Result<(AuthUser, Profile), AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id).await?;

    let denial = match &profile {
        None => Some("no profile"),
        Some(p) if !p.is_active => Some("profile inactive"),
        Some(p) if p.role != role => Some("role mismatch"),
        Some(_) => None,
    };

    match (denial, profile) {
        (None, Some(profile)) => Ok((user, profile)),
        (reason, _) => {
            tracing::warn!(
                user_id = user.user_id,
                required_role = role,
                reason = reason.unwrap_or("unknown"),
                path = %parts.uri.path(),
                "Authorization denied",
            );
            Err(AppError::Core(CoreError::Forbidden(format!(
                "{role} role required"
            ))))
        }
    }
}

/// Requires an active `admin` profile. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin.user_id is an active admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (user, _) = require_role(parts, state, ROLE_ADMIN).await?;
        Ok(RequireAdmin(user))
    }
}

/// Requires an active `provider` profile.
pub struct RequireProvider(pub Profile);

impl FromRequestParts<AppState> for RequireProvider {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (_, profile) = require_role(parts, state, ROLE_PROVIDER).await?;
        Ok(RequireProvider(profile))
    }
}
