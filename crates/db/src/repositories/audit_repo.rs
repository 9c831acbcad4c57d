//! Repository for the append-only `admin_audit` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::audit::{AdminAuditEntry, AuditQuery, CreateAdminAudit};

const COLUMNS: &str = "id, admin_id, action, object_type, object_id, metadata, created_at";

pub struct AdminAuditRepo;

impl AdminAuditRepo {
    /// Record a privileged action. Pass the mutation's transaction so the
    /// entry commits or rolls back with it.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAdminAudit,
    ) -> Result<AdminAuditEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_audit (admin_id, action, object_type, object_id, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminAuditEntry>(&query)
            .bind(input.admin_id)
            .bind(input.action)
            .bind(input.object_type)
            .bind(&input.object_id)
            .bind(&input.metadata)
            .fetch_one(executor)
            .await
    }

    /// Entries matching the filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &AuditQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminAuditEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_audit
             WHERE ($1::BIGINT IS NULL OR admin_id = $1)
               AND ($2::TEXT IS NULL OR object_type = $2)
               AND ($3::TEXT IS NULL OR action = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, AdminAuditEntry>(&query)
            .bind(params.admin_id)
            .bind(&params.object_type)
            .bind(&params.action)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
