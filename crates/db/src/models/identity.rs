//! Credential rows owned by the identity provider.

use ecotour_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `identities` table.
///
/// Contains the password hash and is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Identity {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}
