//! Admin audit trail queries.

use axum::extract::{Query, State};
use axum::Json;
use ecotour_db::models::audit::{AdminAuditEntry, AuditQuery};
use ecotour_db::repositories::AdminAuditRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/audit
///
/// Filters: `admin_id`, `object_type`, `action`; paginated, newest first.
pub async fn list_audit(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminAuditEntry>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let entries = AdminAuditRepo::list(&state.pool, &params, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}
