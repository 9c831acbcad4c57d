//! Editable site text.

use ecotour_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CmsText {
    pub key: String,
    pub value: String,
    pub updated_by: Option<DbId>,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertCmsText {
    pub value: String,
}
