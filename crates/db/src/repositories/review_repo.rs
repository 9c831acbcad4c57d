//! Repository for the `reviews` table.

use ecotour_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review};

const COLUMNS: &str = "id, experience_id, user_id, rating, comment, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review. A second review by the same user for the same
    /// experience violates `uq_reviews_experience_user`.
    pub async fn create(
        pool: &PgPool,
        experience_id: DbId,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (experience_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(experience_id)
            .bind(user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_experience(
        pool: &PgPool,
        experience_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE experience_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(experience_id)
            .fetch_all(pool)
            .await
    }
}
