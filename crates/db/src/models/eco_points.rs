//! Eco-points ledger, balance and configuration models.

use ecotour_core::eco_points::EcoPointsRules;
use ecotour_core::types::{DbId, Money, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A ledger entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EcoPointsTransaction {
    pub id: DbId,
    pub user_id: DbId,
    /// Signed delta: positive for `earn`, negative for `redeem`.
    pub points: i64,
    pub tx_type: String,
    pub reference: Option<String>,
    pub created_at: Timestamp,
}

/// Materialized balance row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EcoPointsBalance {
    pub user_id: DbId,
    pub total_points: i64,
    pub last_updated: Timestamp,
}

/// The single `eco_points_config` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EcoPointsConfig {
    pub earn_multiplier: Decimal,
    pub min_booking_amount: Money,
    pub redeem_value: Money,
    pub updated_by: Option<DbId>,
    pub updated_at: Timestamp,
}

impl EcoPointsConfig {
    pub fn rules(&self) -> EcoPointsRules {
        EcoPointsRules {
            earn_multiplier: self.earn_multiplier,
            min_booking_amount: self.min_booking_amount,
            redeem_value: self.redeem_value,
        }
    }
}

/// DTO for updating the configuration. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEcoPointsConfig {
    pub earn_multiplier: Option<Decimal>,
    pub min_booking_amount: Option<Money>,
    pub redeem_value: Option<Money>,
}

/// Result of recomputing a user's cached balance from the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub user_id: DbId,
    pub ledger_total: i64,
    pub cached_before: i64,
    /// `cached_before - ledger_total`. Zero when the cache was correct.
    pub drift: i64,
}
