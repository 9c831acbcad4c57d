//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ecotour_core::error::CoreError;
use ecotour_core::identity::normalize_email;
use ecotour_core::roles::ROLE_USER;
use ecotour_db::models::profile::Profile;
use ecotour_db::repositories::ProfileRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::accounts::{create_account, NewAccount};
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Profile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Self-service sign-up. Always creates a `user` profile.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    let profile = create_account(
        &state,
        NewAccount {
            email: &input.email,
            password: &input.password,
            full_name: &input.full_name,
            phone: input.phone.as_deref(),
            role: ROLE_USER,
        },
        None,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue an access token. The profile must be active.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user_id = state
        .identity
        .verify_credentials(&email, &input.password)
        .await?
        .ok_or_else(invalid)?;

    let profile = ProfileRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(invalid)?;

    if !profile.is_active {
        tracing::warn!(user_id, "Login refused for deactivated profile");
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let access_token = generate_access_token(profile.id, &profile.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id, "User logged in");
    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: profile,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}
