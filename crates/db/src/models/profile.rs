//! Profile entity model and DTOs.

use ecotour_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table. `id` equals the owning identity id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    /// Cached copy of the eco-points balance.
    pub eco_points: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ecotour_core::roles::ROLE_ADMIN
    }
}

/// DTO for inserting a profile after its identity has been created.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Canonical role name (already normalized).
    pub role: String,
}
