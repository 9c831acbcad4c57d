//! Recording privileged actions in `admin_audit`.

use ecotour_core::audit::redact_sensitive_fields;
use ecotour_core::types::DbId;
use ecotour_db::models::audit::CreateAdminAudit;
use ecotour_db::repositories::AdminAuditRepo;
use sqlx::PgConnection;

use crate::error::AppResult;

/// Append an audit entry on the caller's connection, normally the open
/// transaction of the mutation being audited.
pub async fn record(
    conn: &mut PgConnection,
    admin_id: DbId,
    action: &'static str,
    object_type: &'static str,
    object_id: impl ToString,
    metadata: serde_json::Value,
) -> AppResult<()> {
    AdminAuditRepo::create(
        conn,
        &CreateAdminAudit {
            admin_id,
            action,
            object_type,
            object_id: Some(object_id.to_string()),
            metadata: redact_sensitive_fields(&metadata),
        },
    )
    .await?;
    Ok(())
}
