//! Admin dashboard figures.

use axum::extract::State;
use axum::Json;
use ecotour_db::models::analytics::AnalyticsSummary;
use ecotour_db::repositories::AnalyticsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/analytics
pub async fn summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<AnalyticsSummary>>> {
    let summary = AnalyticsRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}
