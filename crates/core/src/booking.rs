//! Booking lifecycle rules: the status state machine, target resolution,
//! request validation, and pricing.
//!
//! Everything here is pure. The API layer calls these functions inside the
//! database transaction that reserves capacity and inserts the booking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Money};

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Booking status. Stored as lowercase text in `bookings.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Parse the stored text form.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid booking status '{other}'. Must be one of: pending, confirmed, cancelled, completed"
            ))),
        }
    }

    /// `completed` and `cancelled` admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether `self -> to` is a legal edge.
    pub fn can_transition_to(self, to: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject any transition that is not an edge of the state machine.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::IllegalTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Target resolution
// ---------------------------------------------------------------------------

/// What a booking reserves: exactly one of an experience or a marketplace item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    Experience(DbId),
    MarketplaceItem(DbId),
}

/// Resolve the mutually exclusive target references of a booking request.
pub fn resolve_target(
    experience_id: Option<DbId>,
    marketplace_item_id: Option<DbId>,
) -> Result<BookingTarget, CoreError> {
    match (experience_id, marketplace_item_id) {
        (Some(id), None) => Ok(BookingTarget::Experience(id)),
        (None, Some(id)) => Ok(BookingTarget::MarketplaceItem(id)),
        (Some(_), Some(_)) => Err(CoreError::Validation(
            "A booking must reference either an experience or a marketplace item, not both".into(),
        )),
        (None, None) => Err(CoreError::Validation(
            "A booking must reference an experience or a marketplace item".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Maximum party size accepted on a single booking.
pub const MAX_PERSONS_PER_BOOKING: i32 = 50;

pub fn validate_number_of_persons(n: i32) -> Result<(), CoreError> {
    if n < 1 {
        return Err(CoreError::Validation(
            "number_of_persons must be at least 1".into(),
        ));
    }
    if n > MAX_PERSONS_PER_BOOKING {
        return Err(CoreError::Validation(format!(
            "number_of_persons must not exceed {MAX_PERSONS_PER_BOOKING}"
        )));
    }
    Ok(())
}

/// Guest name and email are mandatory contact fields.
pub fn validate_guest_contact(name: &str, email: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("guest_name is required".into()));
    }
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("guest_email is required".into()));
    }
    if !email.contains('@') {
        return Err(CoreError::Validation(format!(
            "guest_email '{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Determine the date of an experience booking.
///
/// With a slot the slot date wins; an explicit `booking_date` must agree
/// with it. Without a slot, `booking_date` is required.
pub fn resolve_experience_date(
    booking_date: Option<Date>,
    slot_date: Option<Date>,
) -> Result<Date, CoreError> {
    match (booking_date, slot_date) {
        (Some(requested), Some(slot)) if requested != slot => Err(CoreError::Validation(format!(
            "booking_date {requested} does not match the slot date {slot}"
        ))),
        (_, Some(slot)) => Ok(slot),
        (Some(requested), None) => Ok(requested),
        (None, None) => Err(CoreError::Validation(
            "booking_date is required for experience bookings without a slot".into(),
        )),
    }
}

/// Longest homestay stay accepted on a single booking.
pub const MAX_STAY_NIGHTS: i64 = 90;

/// Largest amount a booking can carry (`NUMERIC(12,2)`).
pub const MAX_BOOKING_AMOUNT: Money = Money::from_parts(3_567_587_327, 232, 0, false, 2);

/// Number of nights of a homestay stay. Both dates are required, the
/// check-out must fall after the check-in, and the stay is capped at
/// [`MAX_STAY_NIGHTS`].
pub fn homestay_nights(check_in: Option<Date>, check_out: Option<Date>) -> Result<i64, CoreError> {
    let (check_in, check_out) = match (check_in, check_out) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(CoreError::Validation(
                "check_in_date and check_out_date are required for homestay bookings".into(),
            ))
        }
    };
    let nights = (check_out - check_in).num_days();
    if nights < 1 {
        return Err(CoreError::Validation(
            "check_out_date must be after check_in_date".into(),
        ));
    }
    if nights > MAX_STAY_NIGHTS {
        return Err(CoreError::Validation(format!(
            "A homestay booking covers at most {MAX_STAY_NIGHTS} nights, {nights} requested"
        )));
    }
    Ok(nights)
}

/// Every night of a stay, i.e. the dates in `[check_in, check_out)`.
pub fn stay_nights(check_in: Date, check_out: Date) -> impl Iterator<Item = Date> {
    check_in.iter_days().take_while(move |d| *d < check_out)
}

/// Check a stay against a homestay's published available dates.
///
/// An empty list means the listing does not restrict dates.
pub fn check_stay_available(
    available_dates: &[Date],
    check_in: Date,
    check_out: Date,
) -> Result<(), CoreError> {
    if available_dates.is_empty() {
        return Ok(());
    }
    if let Some(missing) = stay_nights(check_in, check_out).find(|night| !available_dates.contains(night))
    {
        return Err(CoreError::Capacity(format!(
            "Homestay is not available on {missing}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

fn ensure_storable(amount: Money) -> Result<Money, CoreError> {
    if amount > MAX_BOOKING_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Booking amount {amount} exceeds the maximum of {MAX_BOOKING_AMOUNT}"
        )));
    }
    Ok(amount)
}

/// Gross price before redemption: unit price times persons, quantity, or nights.
pub fn gross_amount(unit_price: Money, units: i64) -> Result<Money, CoreError> {
    let gross = unit_price
        .checked_mul(Money::from(units))
        .ok_or_else(|| CoreError::Validation("Booking amount is out of range".into()))?;
    ensure_storable(gross)
}

/// Subtract the currency value of redeemed points from the gross amount.
///
/// Redeeming more value than the booking is worth is rejected rather than
/// clamped, so every redeemed point maps to a discount.
pub fn apply_redemption(gross: Money, redeemed_value: Money) -> Result<Money, CoreError> {
    if redeemed_value > gross {
        return Err(CoreError::Validation(format!(
            "Redeemed eco-points are worth {redeemed_value}, which exceeds the booking amount {gross}"
        )));
    }
    ensure_storable(gross - redeemed_value)
}
