//! Admin dashboard aggregates.

use ecotour_core::types::Money;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_users: i64,
    pub total_bookings: i64,
    pub bookings_by_status: Vec<StatusCount>,
    /// Sum of `total_amount` over bookings that were not cancelled.
    pub total_revenue: Money,
    /// `None` when there are no reviews.
    pub average_rating: Option<f64>,
    pub eco_points_outstanding: i64,
}
