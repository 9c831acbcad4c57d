//! Booking status transitions with their side effects.
//!
//! - `pending|confirmed -> cancelled` releases slot places or handicraft
//!   stock and refunds redeemed points.
//! - `confirmed -> completed` credits earned points.
//!
//! The booking row is locked first, then the slot or listing, then the
//! eco-points balance.

use ecotour_core::audit::{actions, objects};
use ecotour_core::booking::{validate_transition, BookingStatus};
use ecotour_core::catalog::MARKETPLACE_HANDICRAFT;
use ecotour_core::eco_points::{booking_reference, refund_reference, TxType};
use ecotour_core::error::CoreError;
use ecotour_core::types::DbId;
use ecotour_db::models::booking::Booking;
use ecotour_db::repositories::{BookingRepo, EcoPointsConfigRepo, MarketplaceRepo, SlotRepo};
use serde_json::json;
use sqlx::{PgConnection, PgPool};

use crate::audit;
use crate::error::AppResult;
use crate::ledger;

/// Move booking `booking_id` to `to` on behalf of admin `admin_id`.
pub async fn transition_booking(
    pool: &PgPool,
    admin_id: DbId,
    booking_id: DbId,
    to: BookingStatus,
) -> AppResult<Booking> {
    let mut tx = pool.begin().await?;

    let booking = BookingRepo::find_for_update(&mut *tx, booking_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        })?;
    let from = BookingStatus::parse(&booking.status)?;
    validate_transition(from, to)?;

    let earned = match to {
        BookingStatus::Cancelled => {
            release_capacity(&mut tx, &booking).await?;
            refund_redemption(&mut tx, &booking).await?;
            None
        }
        BookingStatus::Completed => Some(credit_earned_points(&mut tx, &booking).await?),
        _ => None,
    };

    let updated = BookingRepo::set_status(&mut *tx, booking_id, to.as_str(), earned).await?;

    audit::record(
        &mut tx,
        admin_id,
        actions::STATUS_CHANGE,
        objects::BOOKING,
        booking_id,
        json!({
            "from": from.as_str(),
            "to": to.as_str(),
            "eco_points_earned": updated.eco_points_earned,
        }),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        booking_id,
        admin_id,
        from = from.as_str(),
        to = to.as_str(),
        "Booking status changed",
    );
    Ok(updated)
}

async fn release_capacity(conn: &mut PgConnection, booking: &Booking) -> AppResult<()> {
    if let Some(slot_id) = booking.slot_id {
        let released = SlotRepo::release(&mut *conn, slot_id, booking.number_of_persons).await?;
        if released.is_none() {
            tracing::warn!(
                booking_id = booking.id,
                slot_id,
                "Slot of cancelled booking no longer exists",
            );
        }
    }

    if let Some(item_id) = booking.marketplace_item_id {
        let item = MarketplaceRepo::find_by_id(&mut *conn, item_id).await?;
        if item.is_some_and(|i| i.item_type == MARKETPLACE_HANDICRAFT) {
            MarketplaceRepo::restore_stock(&mut *conn, item_id, booking.number_of_persons).await?;
        }
    }
    Ok(())
}

async fn refund_redemption(conn: &mut PgConnection, booking: &Booking) -> AppResult<()> {
    if booking.eco_points_used > 0 {
        ledger::append(
            conn,
            booking.user_id,
            booking.eco_points_used,
            TxType::Earn,
            &refund_reference(booking.id),
        )
        .await?;
    }
    Ok(())
}

/// Credit the points a completed booking earns and return the amount.
async fn credit_earned_points(conn: &mut PgConnection, booking: &Booking) -> AppResult<i64> {
    let rules = EcoPointsConfigRepo::get(&mut *conn).await?.rules();
    let points = rules.points_earned(booking.total_amount);
    if points > 0 {
        ledger::append(
            conn,
            booking.user_id,
            points,
            TxType::Earn,
            &booking_reference(booking.id),
        )
        .await?;
    }
    Ok(points)
}
