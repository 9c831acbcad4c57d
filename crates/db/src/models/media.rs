//! Uploaded media records.

use ecotour_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub bucket: String,
    pub path: String,
    pub url: String,
    pub uploaded_by: Option<DbId>,
    /// Original file name, size and content type.
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub bucket: String,
    pub path: String,
    pub url: String,
    pub uploaded_by: DbId,
    pub meta: serde_json::Value,
}
