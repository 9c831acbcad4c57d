//! Identity provider contract.
//!
//! Credentials live behind this trait, separate from profiles. Creating an
//! account is therefore two writes (identity, then profile) and callers must
//! delete the identity again when the profile write fails.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum password length for new identities.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new credential. Fails with [`CoreError::Conflict`] if the
    /// email is already registered.
    async fn create_identity(&self, email: &str, password: &str) -> Result<DbId, CoreError>;

    /// Remove a credential. Used as the compensating action for a failed
    /// profile insert.
    async fn delete_identity(&self, id: DbId) -> Result<(), CoreError>;

    /// Return the identity id when the email and password match.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<DbId>, CoreError>;
}

/// Emails are compared case-insensitively and stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
