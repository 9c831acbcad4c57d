//! Repository for the `media` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::media::{CreateMedia, Media};

const COLUMNS: &str = "id, bucket, path, url, uploaded_by, meta, created_at";

pub struct MediaRepo;

impl MediaRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateMedia,
    ) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (bucket, path, url, uploaded_by, meta)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(&input.bucket)
            .bind(&input.path)
            .bind(&input.url)
            .bind(input.uploaded_by)
            .bind(&input.meta)
            .fetch_one(executor)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
