//! Repository for the `experiences` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::experience::{CreateExperience, Experience, ExperienceQuery, UpdateExperience};

const COLUMNS: &str = "id, title, description, category, location, image_url, price, \
                       is_active, is_featured, provider_id, created_by, created_at, updated_at";

pub struct ExperienceRepo;

impl ExperienceRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateExperience,
        created_by: DbId,
    ) -> Result<Experience, sqlx::Error> {
        let query = format!(
            "INSERT INTO experiences
                (title, description, category, location, image_url, price,
                 is_active, is_featured, provider_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true), COALESCE($8, false), $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(input.price)
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.provider_id)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// Find an experience regardless of its active flag.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences WHERE id = $1");
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an experience only if it is active (bookable and publicly visible).
    pub async fn find_active<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Active experiences, featured first, then newest.
    pub async fn list_public(
        pool: &PgPool,
        params: &ExperienceQuery,
    ) -> Result<Vec<Experience>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experiences
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR category = $1)
               AND ($2::BOOLEAN IS NULL OR is_featured = $2)
             ORDER BY is_featured DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(&params.category)
            .bind(params.featured)
            .fetch_all(pool)
            .await
    }

    /// Every experience including inactive ones.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Experience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiences ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Experience>(&query).fetch_all(pool).await
    }

    /// Update an experience. Only non-`None` fields in `input` are applied.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateExperience,
    ) -> Result<Option<Experience>, sqlx::Error> {
        let query = format!(
            "UPDATE experiences SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                image_url = COALESCE($6, image_url),
                price = COALESCE($7, price),
                is_active = COALESCE($8, is_active),
                is_featured = COALESCE($9, is_featured),
                provider_id = COALESCE($10, provider_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experience>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(input.price)
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(input.provider_id)
            .fetch_optional(executor)
            .await
    }

    /// Whether any booking references the experience.
    pub async fn has_bookings<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM bookings WHERE experience_id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Hard-delete an experience and its slots. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
