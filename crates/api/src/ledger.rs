//! Eco-points ledger operations with domain errors.
//!
//! Wraps [`EcoPointsRepo::append`] with the sign check and turns a refused
//! append into [`CoreError::InsufficientPoints`].

use ecotour_core::eco_points::{validate_delta, TxType};
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::eco_points::EcoPointsTransaction;
use ecotour_db::repositories::EcoPointsRepo;
use sqlx::PgConnection;

use crate::error::AppResult;

/// Append a ledger entry inside the caller's transaction.
pub async fn append(
    conn: &mut PgConnection,
    user_id: DbId,
    delta: i64,
    tx_type: TxType,
    reference: &str,
) -> AppResult<EcoPointsTransaction> {
    validate_delta(tx_type, delta)?;

    match EcoPointsRepo::append(&mut *conn, user_id, delta, tx_type, Some(reference)).await? {
        Some(entry) => {
            tracing::debug!(
                user_id,
                delta,
                tx_type = tx_type.as_str(),
                reference,
                "Eco-points appended",
            );
            Ok(entry)
        }
        None => {
            let available = EcoPointsRepo::cached_balance(&mut *conn, user_id).await?;
            Err(CoreError::InsufficientPoints {
                available,
                requested: -delta,
            }
            .into())
        }
    }
}
