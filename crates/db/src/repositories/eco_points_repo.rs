//! Repository for the eco-points ledger and its materialized balance.
//!
//! The ledger is append-only: this module exposes no update or delete for
//! `eco_points_transactions`. Every append moves `eco_points_balance` and the
//! `profiles.eco_points` cache in the same transaction.

use ecotour_core::eco_points::TxType;
use ecotour_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::eco_points::{EcoPointsBalance, EcoPointsTransaction, Reconciliation};

const TX_COLUMNS: &str = "id, user_id, points, tx_type, reference, created_at";

pub struct EcoPointsRepo;

impl EcoPointsRepo {
    /// Apply a signed `delta` to the user's balance and record the entry.
    ///
    /// Returns `None`, with no writes, when the balance would go negative.
    /// The caller is responsible for checking the sign against `tx_type`.
    pub async fn append(
        conn: &mut PgConnection,
        user_id: DbId,
        delta: i64,
        tx_type: TxType,
        reference: Option<&str>,
    ) -> Result<Option<EcoPointsTransaction>, sqlx::Error> {
        sqlx::query(
            "INSERT INTO eco_points_balance (user_id, total_points)
             VALUES ($1, 0)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        let updated: Option<(i64,)> = sqlx::query_as(
            "UPDATE eco_points_balance
             SET total_points = total_points + $2, last_updated = NOW()
             WHERE user_id = $1 AND total_points + $2 >= 0
             RETURNING total_points",
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?;

        let Some((new_total,)) = updated else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO eco_points_transactions (user_id, points, tx_type, reference)
             VALUES ($1, $2, $3, $4)
             RETURNING {TX_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, EcoPointsTransaction>(&query)
            .bind(user_id)
            .bind(delta)
            .bind(tx_type.as_str())
            .bind(reference)
            .fetch_one(&mut *conn)
            .await?;

        sqlx::query("UPDATE profiles SET eco_points = $2 WHERE id = $1")
            .bind(user_id)
            .bind(new_total)
            .execute(&mut *conn)
            .await?;

        Ok(Some(entry))
    }

    /// Ledger balance: the sum of every delta recorded for the user.
    pub async fn balance(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0)::BIGINT FROM eco_points_transactions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// The materialized balance, or zero when the user has never transacted.
    pub async fn cached_balance<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT total_points FROM eco_points_balance WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?;
        Ok(row.map(|r| r.0).unwrap_or(0))
    }

    pub async fn find_balance(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<EcoPointsBalance>, sqlx::Error> {
        sqlx::query_as::<_, EcoPointsBalance>(
            "SELECT user_id, total_points, last_updated FROM eco_points_balance WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// A user's ledger entries, newest first.
    pub async fn list_transactions(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EcoPointsTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {TX_COLUMNS} FROM eco_points_transactions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, EcoPointsTransaction>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the cached balance with the ledger sum, reporting the drift.
    pub async fn reconcile(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Reconciliation, sqlx::Error> {
        sqlx::query(
            "INSERT INTO eco_points_balance (user_id, total_points)
             VALUES ($1, 0)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        let (cached_before,): (i64,) = sqlx::query_as(
            "SELECT total_points FROM eco_points_balance WHERE user_id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        let (ledger_total,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0)::BIGINT FROM eco_points_transactions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            "UPDATE eco_points_balance SET total_points = $2, last_updated = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(ledger_total)
        .execute(&mut *conn)
        .await?;

        sqlx::query("UPDATE profiles SET eco_points = $2 WHERE id = $1")
            .bind(user_id)
            .bind(ledger_total)
            .execute(&mut *conn)
            .await?;

        Ok(Reconciliation {
            user_id,
            ledger_total,
            cached_before,
            drift: cached_before - ledger_total,
        })
    }
}
