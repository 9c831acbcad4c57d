//! Repository for the single-row `eco_points_config` table.

use ecotour_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::eco_points::{EcoPointsConfig, UpdateEcoPointsConfig};

const COLUMNS: &str = "earn_multiplier, min_booking_amount, redeem_value, updated_by, updated_at";

pub struct EcoPointsConfigRepo;

impl EcoPointsConfigRepo {
    /// Read the configuration row (seeded by the migration).
    pub async fn get<'e>(executor: impl PgExecutor<'e>) -> Result<EcoPointsConfig, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM eco_points_config WHERE id = 1");
        sqlx::query_as::<_, EcoPointsConfig>(&query)
            .fetch_one(executor)
            .await
    }

    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        input: &UpdateEcoPointsConfig,
        updated_by: DbId,
    ) -> Result<EcoPointsConfig, sqlx::Error> {
        let query = format!(
            "UPDATE eco_points_config SET
                earn_multiplier = COALESCE($1, earn_multiplier),
                min_booking_amount = COALESCE($2, min_booking_amount),
                redeem_value = COALESCE($3, redeem_value),
                updated_by = $4,
                updated_at = NOW()
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EcoPointsConfig>(&query)
            .bind(input.earn_multiplier)
            .bind(input.min_booking_amount)
            .bind(input.redeem_value)
            .bind(updated_by)
            .fetch_one(executor)
            .await
    }
}
