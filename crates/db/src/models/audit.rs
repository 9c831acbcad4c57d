//! Admin audit entry model and DTOs.
//!
//! Entries are append-only; there is no update DTO.

use ecotour_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `admin_audit` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminAuditEntry {
    pub id: DbId,
    pub admin_id: Option<DbId>,
    pub action: String,
    pub object_type: String,
    pub object_id: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for recording a privileged action. `metadata` must already be redacted.
#[derive(Debug, Clone)]
pub struct CreateAdminAudit {
    pub admin_id: DbId,
    pub action: &'static str,
    pub object_type: &'static str,
    pub object_id: Option<String>,
    pub metadata: serde_json::Value,
}

/// Filters for the audit list (`?admin_id=&object_type=&action=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub admin_id: Option<DbId>,
    pub object_type: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
