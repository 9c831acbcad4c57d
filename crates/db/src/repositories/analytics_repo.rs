//! Aggregates for the admin dashboard, computed on read.

use ecotour_core::types::Money;
use sqlx::PgPool;

use crate::models::analytics::{AnalyticsSummary, StatusCount};

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    pub async fn summary(pool: &PgPool) -> Result<AnalyticsSummary, sqlx::Error> {
        let (total_users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await?;

        let bookings_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM bookings GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;
        let total_bookings = bookings_by_status.iter().map(|s| s.count).sum();

        let (total_revenue,): (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_amount), 0) FROM bookings WHERE status <> 'cancelled'",
        )
        .fetch_one(pool)
        .await?;

        let (average_rating,): (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating)::FLOAT8 FROM reviews")
                .fetch_one(pool)
                .await?;

        let (eco_points_outstanding,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(total_points), 0)::BIGINT FROM eco_points_balance")
                .fetch_one(pool)
                .await?;

        Ok(AnalyticsSummary {
            total_users,
            total_bookings,
            bookings_by_status,
            total_revenue,
            average_rating,
            eco_points_outstanding,
        })
    }
}
