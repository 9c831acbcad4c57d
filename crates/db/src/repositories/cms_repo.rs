//! Repository for the `cms_texts` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::cms::CmsText;

const COLUMNS: &str = "key, value, updated_by, last_updated";

pub struct CmsTextRepo;

impl CmsTextRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<CmsText>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cms_texts ORDER BY key");
        sqlx::query_as::<_, CmsText>(&query).fetch_all(pool).await
    }

    /// Insert or replace the text stored under `key`.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        key: &str,
        value: &str,
        updated_by: DbId,
    ) -> Result<CmsText, sqlx::Error> {
        let query = format!(
            "INSERT INTO cms_texts (key, value, updated_by)
             VALUES ($1, $2, $3)
             ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value,
                    updated_by = EXCLUDED.updated_by,
                    last_updated = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CmsText>(&query)
            .bind(key)
            .bind(value)
            .bind(updated_by)
            .fetch_one(executor)
            .await
    }
}
