//! Repository for the `providers` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::provider::{CreateProvider, Provider};

const COLUMNS: &str = "id, name, description, owner_profile_id, verified, verification_proof, \
                       created_at, updated_at";

pub struct ProviderRepo;

impl ProviderRepo {
    /// Register a provider in the pending state.
    pub async fn create(
        pool: &PgPool,
        owner_profile_id: DbId,
        input: &CreateProvider,
    ) -> Result<Provider, sqlx::Error> {
        let query = format!(
            "INSERT INTO providers (name, description, owner_profile_id, verification_proof)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner_profile_id)
            .bind(&input.verification_proof)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List providers, optionally narrowed to `pending`, `verified` or
    /// `rejected`. Unknown filters match nothing.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Provider>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM providers
             WHERE $1::TEXT IS NULL
                OR ($1 = 'pending' AND verified IS NULL)
                OR ($1 = 'verified' AND verified = true)
                OR ($1 = 'rejected' AND verified = false)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Record an admin verification decision.
    pub async fn set_verification<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        verified: bool,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query =
            format!("UPDATE providers SET verified = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .bind(verified)
            .fetch_optional(executor)
            .await
    }
}
