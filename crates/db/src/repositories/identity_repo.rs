//! Repository for the `identities` table.

use ecotour_core::types::DbId;
use sqlx::PgPool;

use crate::models::identity::Identity;

const COLUMNS: &str = "id, email, password_hash, created_at";

pub struct IdentityRepo;

impl IdentityRepo {
    /// Insert a credential. Fails with a `uq_identities_email` violation when
    /// the email is taken.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<Identity, sqlx::Error> {
        let query = format!(
            "INSERT INTO identities (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Identity>(&query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identities WHERE email = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a credential. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
