//! Repository for the `experience_slots` table.
//!
//! Capacity changes are single conditional `UPDATE` statements. PostgreSQL
//! re-evaluates the `WHERE` clause after taking the row lock, so concurrent
//! reservations against one slot serialize and can never overshoot
//! `max_capacity`.

use ecotour_core::types::{Date, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::models::slot::{CreateSlot, ExperienceSlot, UpdateSlot};

const COLUMNS: &str = "id, experience_id, slot_date, slot_time, max_capacity, booked_capacity, \
                       is_available, price_override, created_at";

pub struct SlotRepo;

impl SlotRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        experience_id: DbId,
        input: &CreateSlot,
    ) -> Result<ExperienceSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO experience_slots (experience_id, slot_date, slot_time, max_capacity, price_override)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(experience_id)
            .bind(input.slot_date)
            .bind(input.slot_time)
            .bind(input.max_capacity)
            .bind(input.price_override)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ExperienceSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experience_slots WHERE id = $1");
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock a slot row for the rest of the caller's transaction.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ExperienceSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experience_slots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Open slots of an experience dated on or after `from`, soonest first.
    pub async fn list_available(
        pool: &PgPool,
        experience_id: DbId,
        from: Date,
    ) -> Result<Vec<ExperienceSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM experience_slots
             WHERE experience_id = $1 AND slot_date >= $2 AND is_available = true
             ORDER BY slot_date, slot_time NULLS FIRST, id"
        );
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(experience_id)
            .bind(from)
            .fetch_all(pool)
            .await
    }

    /// Update a slot. The caller must have checked the new `max_capacity`
    /// against `booked_capacity`; the table CHECK rejects it otherwise.
    ///
    /// `is_available` can only be true while the slot has room.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateSlot,
    ) -> Result<Option<ExperienceSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE experience_slots SET
                slot_date = COALESCE($2, slot_date),
                slot_time = COALESCE($3, slot_time),
                max_capacity = COALESCE($4, max_capacity),
                price_override = COALESCE($5, price_override),
                is_available = COALESCE($6, is_available)
                    AND booked_capacity < COALESCE($4, max_capacity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(id)
            .bind(input.slot_date)
            .bind(input.slot_time)
            .bind(input.max_capacity)
            .bind(input.price_override)
            .bind(input.is_available)
            .fetch_optional(executor)
            .await
    }

    /// Reserve `persons` places. Returns `None` when the slot does not exist,
    /// is closed, or lacks room; nothing changes in that case.
    pub async fn reserve<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        persons: i32,
    ) -> Result<Option<ExperienceSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE experience_slots SET
                booked_capacity = booked_capacity + $2,
                is_available = (booked_capacity + $2) < max_capacity
             WHERE id = $1
               AND is_available = true
               AND booked_capacity + $2 <= max_capacity
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(id)
            .bind(persons)
            .fetch_optional(executor)
            .await
    }

    /// Give back `persons` places.
    ///
    /// A slot that was closed because it was full reopens. A slot an admin
    /// closed while it still had room stays closed.
    pub async fn release<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        persons: i32,
    ) -> Result<Option<ExperienceSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE experience_slots SET
                booked_capacity = booked_capacity - $2,
                is_available = (is_available OR booked_capacity >= max_capacity)
                    AND (booked_capacity - $2) < max_capacity
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExperienceSlot>(&query)
            .bind(id)
            .bind(persons)
            .fetch_optional(executor)
            .await
    }
}
