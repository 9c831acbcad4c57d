//! Booking entity model and DTOs.

use ecotour_core::types::{Date, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub experience_id: Option<DbId>,
    pub marketplace_item_id: Option<DbId>,
    pub slot_id: Option<DbId>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub number_of_persons: i32,
    pub booking_date: Option<Date>,
    pub check_in_date: Option<Date>,
    pub check_out_date: Option<Date>,
    pub total_amount: Money,
    pub eco_points_earned: i64,
    pub eco_points_used: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fully resolved insert. Pricing and targets are settled by the caller;
/// the row is always inserted as `pending`.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub experience_id: Option<DbId>,
    pub marketplace_item_id: Option<DbId>,
    pub slot_id: Option<DbId>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub number_of_persons: i32,
    pub booking_date: Option<Date>,
    pub check_in_date: Option<Date>,
    pub check_out_date: Option<Date>,
    pub total_amount: Money,
    pub eco_points_used: i64,
    pub notes: Option<String>,
}

/// Admin list filters (`?status=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
