//! Experience slot entity model and DTOs.

use chrono::NaiveTime;
use ecotour_core::types::{Date, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `experience_slots` table.
///
/// The database enforces `0 <= booked_capacity <= max_capacity`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExperienceSlot {
    pub id: DbId,
    pub experience_id: DbId,
    pub slot_date: Date,
    pub slot_time: Option<NaiveTime>,
    pub max_capacity: i32,
    pub booked_capacity: i32,
    pub is_available: bool,
    pub price_override: Option<Money>,
    pub created_at: Timestamp,
}

impl ExperienceSlot {
    pub fn remaining(&self) -> i32 {
        self.max_capacity - self.booked_capacity
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlot {
    pub slot_date: Date,
    pub slot_time: Option<NaiveTime>,
    pub max_capacity: i32,
    pub price_override: Option<Money>,
}

/// DTO for updating a slot. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSlot {
    pub slot_date: Option<Date>,
    pub slot_time: Option<NaiveTime>,
    pub max_capacity: Option<i32>,
    pub is_available: Option<bool>,
    pub price_override: Option<Money>,
}
