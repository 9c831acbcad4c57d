//! Account creation: identity first, then profile.
//!
//! The two writes live in different stores, so a failed profile insert is
//! compensated by deleting the identity that was just created.

use ecotour_core::audit::{actions, objects};
use ecotour_core::identity::{normalize_email, validate_password_strength};
use ecotour_core::types::DbId;
use ecotour_db::models::profile::{CreateProfile, Profile};
use ecotour_db::repositories::ProfileRepo;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    /// Canonical role name.
    pub role: &'static str,
}

/// Create an identity and its profile.
///
/// When `created_by` is set the creation is audited as an admin action in
/// the same transaction as the profile insert.
pub async fn create_account(
    state: &AppState,
    input: NewAccount<'_>,
    created_by: Option<DbId>,
) -> AppResult<Profile> {
    validate_password_strength(input.password)?;
    let email = normalize_email(input.email);

    let identity_id = state.identity.create_identity(&email, input.password).await?;

    match insert_profile(state, identity_id, &email, &input, created_by).await {
        Ok(profile) => {
            tracing::info!(user_id = profile.id, role = %profile.role, "Account created");
            Ok(profile)
        }
        Err(err) => {
            tracing::error!(identity_id, error = %err, "Profile insert failed, removing identity");
            if let Err(cleanup_err) = state.identity.delete_identity(identity_id).await {
                tracing::error!(
                    identity_id,
                    error = %cleanup_err,
                    "Failed to remove orphaned identity",
                );
            }
            Err(AppError::InternalError(format!(
                "Failed to create profile for identity {identity_id}: {err}"
            )))
        }
    }
}

async fn insert_profile(
    state: &AppState,
    identity_id: DbId,
    email: &str,
    input: &NewAccount<'_>,
    created_by: Option<DbId>,
) -> AppResult<Profile> {
    let mut tx = state.pool.begin().await?;

    let profile = ProfileRepo::create(
        &mut *tx,
        &CreateProfile {
            id: identity_id,
            full_name: input.full_name.trim().to_string(),
            email: email.to_string(),
            phone: input.phone.map(str::to_string),
            role: input.role.to_string(),
        },
    )
    .await?;

    if let Some(admin_id) = created_by {
        audit::record(
            &mut tx,
            admin_id,
            actions::CREATE,
            objects::ADMIN_USER,
            profile.id,
            json!({
                "email": profile.email,
                "full_name": profile.full_name,
                "role": profile.role,
            }),
        )
        .await?;
    }

    tx.commit().await?;
    Ok(profile)
}
