//! Experience reviews.

use ecotour_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub experience_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub rating: i32,
    pub comment: Option<String>,
}
