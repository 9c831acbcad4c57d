//! Provider entity model and DTOs.

use ecotour_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `providers` table.
///
/// `verified` is `None` while pending review, `Some(true)` once verified and
/// `Some(false)` when rejected.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub owner_profile_id: DbId,
    pub verified: Option<bool>,
    pub verification_proof: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProvider {
    pub name: String,
    pub description: Option<String>,
    pub verification_proof: Option<String>,
}

/// Filter for the admin provider list: `pending`, `verified` or `rejected`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderQuery {
    pub status: Option<String>,
}
