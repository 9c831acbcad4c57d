//! Experience entity model and DTOs.

use ecotour_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `experiences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Experience {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub price: Money,
    pub is_active: bool,
    pub is_featured: bool,
    pub provider_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperience {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub price: Money,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub provider_id: Option<DbId>,
}

/// DTO for updating an experience. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExperience {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Money>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub provider_id: Option<DbId>,
}

/// Public list filters (`?category=&featured=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}
