//! PostgreSQL-backed identity provider storing Argon2id hashes.

use async_trait::async_trait;
use ecotour_core::error::CoreError;
use ecotour_core::identity::IdentityProvider;
use ecotour_core::types::DbId;
use ecotour_db::repositories::IdentityRepo;
use sqlx::PgPool;

use super::password::{hash_password, verify_password};

pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> CoreError {
    CoreError::ExternalService(format!("Identity store error: {err}"))
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn create_identity(&self, email: &str, password: &str) -> Result<DbId, CoreError> {
        let hash = hash_password(password)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        match IdentityRepo::create(&self.pool, email, &hash).await {
            Ok(identity) => Ok(identity.id),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_identities_email") =>
            {
                Err(CoreError::Conflict(format!(
                    "Email '{email}' is already registered"
                )))
            }
            Err(e) => Err(store_error(e)),
        }
    }

    async fn delete_identity(&self, id: DbId) -> Result<(), CoreError> {
        IdentityRepo::delete(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<DbId>, CoreError> {
        let Some(identity) = IdentityRepo::find_by_email(&self.pool, email)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let matches = verify_password(password, &identity.password_hash)
            .map_err(|e| CoreError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Ok(matches.then_some(identity.id))
    }
}
