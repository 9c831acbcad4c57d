//! Repository for the `profiles` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::profile::{CreateProfile, Profile};

const COLUMNS: &str = "id, full_name, email, phone, role, eco_points, is_active, \
                       created_at, updated_at";

/// Provides profile lookups and the admin-gated role/activation updates.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, full_name, email, phone, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.role)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, newest first, optionally filtered by role.
    pub async fn list(
        pool: &PgPool,
        role: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the role. Returns `None` if no profile has the given `id`.
    pub async fn update_role<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        role: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(executor)
            .await
    }

    /// Activate or deactivate. Returns `None` if no profile has the given `id`.
    pub async fn set_active<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query =
            format!("UPDATE profiles SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(executor)
            .await
    }
}
