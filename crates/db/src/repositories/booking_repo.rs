//! Repository for the `bookings` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::booking::{Booking, CreateBooking};

const COLUMNS: &str = "id, user_id, experience_id, marketplace_item_id, slot_id, guest_name, \
                       guest_email, guest_phone, number_of_persons, booking_date, check_in_date, \
                       check_out_date, total_amount, eco_points_earned, eco_points_used, status, \
                       notes, created_at, updated_at";

pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking in the `pending` state.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (user_id, experience_id, marketplace_item_id, slot_id, guest_name, guest_email,
                 guest_phone, number_of_persons, booking_date, check_in_date, check_out_date,
                 total_amount, eco_points_used, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'pending')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.experience_id)
            .bind(input.marketplace_item_id)
            .bind(input.slot_id)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(&input.guest_phone)
            .bind(input.number_of_persons)
            .bind(input.booking_date)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .bind(input.total_amount)
            .bind(input.eco_points_used)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock a booking row for the rest of the caller's transaction so that
    /// concurrent status transitions serialize.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// A user's bookings, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All bookings, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Write a new status, and the earned points when given.
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: &str,
        eco_points_earned: Option<i64>,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                status = $2,
                eco_points_earned = COALESCE($3, eco_points_earned)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status)
            .bind(eco_points_earned)
            .fetch_one(executor)
            .await
    }
}
