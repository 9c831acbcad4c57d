//! Booking admission.

use ecotour_core::booking::{
    apply_redemption, check_stay_available, gross_amount, homestay_nights,
    resolve_experience_date, resolve_target, validate_guest_contact, validate_number_of_persons,
    BookingTarget,
};
use ecotour_core::catalog::{MARKETPLACE_HANDICRAFT, MARKETPLACE_HOMESTAY};
use ecotour_core::eco_points::{booking_reference, validate_points_used, TxType};
use ecotour_core::error::CoreError;
use ecotour_core::types::{Date, DbId, Money};
use ecotour_db::models::booking::{Booking, CreateBooking};
use ecotour_db::repositories::{
    BookingRepo, EcoPointsConfigRepo, EcoPointsRepo, ExperienceRepo, MarketplaceRepo, SlotRepo,
};
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::ledger;

fn default_persons() -> i32 {
    1
}

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(max = 200))]
    pub guest_name: String,
    #[validate(length(max = 320))]
    pub guest_email: String,
    #[validate(length(max = 50))]
    pub guest_phone: Option<String>,
    pub experience_id: Option<DbId>,
    pub marketplace_item_id: Option<DbId>,
    pub slot_id: Option<DbId>,
    #[serde(default = "default_persons")]
    pub number_of_persons: i32,
    pub booking_date: Option<Date>,
    pub check_in_date: Option<Date>,
    pub check_out_date: Option<Date>,
    #[serde(default)]
    pub eco_points_used: i64,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// What the capacity step settled: the gross price and the dates to store.
struct Admission {
    slot_id: Option<DbId>,
    gross: Money,
    booking_date: Option<Date>,
    check_in_date: Option<Date>,
    check_out_date: Option<Date>,
}

/// Admit a booking for `user_id`.
///
/// Capacity is taken (slot places or handicraft stock), the booking is
/// inserted as `pending`, and redeemed points are debited, all in one
/// transaction. Any failure leaves no trace.
pub async fn create_booking(
    pool: &PgPool,
    user_id: DbId,
    req: CreateBookingRequest,
) -> AppResult<Booking> {
    validate_guest_contact(&req.guest_name, &req.guest_email)?;
    validate_number_of_persons(req.number_of_persons)?;
    validate_points_used(req.eco_points_used)?;
    let target = resolve_target(req.experience_id, req.marketplace_item_id)?;

    let mut tx = pool.begin().await?;

    if req.eco_points_used > 0 {
        let available = EcoPointsRepo::cached_balance(&mut *tx, user_id).await?;
        if available < req.eco_points_used {
            return Err(CoreError::InsufficientPoints {
                available,
                requested: req.eco_points_used,
            }
            .into());
        }
    }

    let rules = EcoPointsConfigRepo::get(&mut *tx).await?.rules();

    let admission = match target {
        BookingTarget::Experience(id) => admit_experience(&mut tx, id, &req).await?,
        BookingTarget::MarketplaceItem(id) => admit_listing(&mut tx, id, &req).await?,
    };

    let total_amount = apply_redemption(
        admission.gross,
        rules.redemption_value(req.eco_points_used),
    )?;

    let booking = BookingRepo::create(
        &mut *tx,
        &CreateBooking {
            user_id,
            experience_id: req.experience_id,
            marketplace_item_id: req.marketplace_item_id,
            slot_id: admission.slot_id,
            guest_name: req.guest_name.trim().to_string(),
            guest_email: req.guest_email.trim().to_string(),
            guest_phone: req.guest_phone.clone(),
            number_of_persons: req.number_of_persons,
            booking_date: admission.booking_date,
            check_in_date: admission.check_in_date,
            check_out_date: admission.check_out_date,
            total_amount,
            eco_points_used: req.eco_points_used,
            notes: req.notes.clone(),
        },
    )
    .await?;

    if req.eco_points_used > 0 {
        ledger::append(
            &mut tx,
            user_id,
            -req.eco_points_used,
            TxType::Redeem,
            &booking_reference(booking.id),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        booking_id = booking.id,
        user_id,
        total_amount = %booking.total_amount,
        eco_points_used = booking.eco_points_used,
        "Booking created",
    );
    Ok(booking)
}

/// Experience bookings reserve slot places when a slot is given.
async fn admit_experience(
    conn: &mut PgConnection,
    experience_id: DbId,
    req: &CreateBookingRequest,
) -> AppResult<Admission> {
    if req.check_in_date.is_some() || req.check_out_date.is_some() {
        return Err(CoreError::Validation(
            "check_in_date and check_out_date apply to homestay bookings only".into(),
        )
        .into());
    }

    let experience = ExperienceRepo::find_active(&mut *conn, experience_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Experience",
            id: experience_id,
        })?;

    let Some(slot_id) = req.slot_id else {
        let booking_date = resolve_experience_date(req.booking_date, None)?;
        return Ok(Admission {
            slot_id: None,
            gross: gross_amount(experience.price, i64::from(req.number_of_persons))?,
            booking_date: Some(booking_date),
            check_in_date: None,
            check_out_date: None,
        });
    };

    let slot = SlotRepo::find_by_id(&mut *conn, slot_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ExperienceSlot",
            id: slot_id,
        })?;
    if slot.experience_id != experience.id {
        return Err(CoreError::Validation(format!(
            "Slot {slot_id} does not belong to experience {experience_id}"
        ))
        .into());
    }
    let booking_date = resolve_experience_date(req.booking_date, Some(slot.slot_date))?;

    let reserved = SlotRepo::reserve(&mut *conn, slot_id, req.number_of_persons).await?;
    let Some(slot) = reserved else {
        // Re-read: the earlier snapshot may predate a concurrent reservation.
        let current = SlotRepo::find_by_id(&mut *conn, slot_id).await?;
        let message = match current {
            Some(s) if !s.is_available => format!("Slot {slot_id} is not available"),
            Some(s) => format!(
                "Slot {slot_id} has {} of {} places left, {} requested",
                s.remaining(),
                s.max_capacity,
                req.number_of_persons
            ),
            None => format!("Slot {slot_id} no longer exists"),
        };
        return Err(CoreError::Capacity(message).into());
    };

    let unit_price = slot.price_override.unwrap_or(experience.price);
    Ok(Admission {
        slot_id: Some(slot.id),
        gross: gross_amount(unit_price, i64::from(req.number_of_persons))?,
        booking_date: Some(booking_date),
        check_in_date: None,
        check_out_date: None,
    })
}

/// Handicrafts take stock; homestays check the requested nights.
async fn admit_listing(
    conn: &mut PgConnection,
    item_id: DbId,
    req: &CreateBookingRequest,
) -> AppResult<Admission> {
    if req.slot_id.is_some() {
        return Err(CoreError::Validation(
            "slot_id applies to experience bookings only".into(),
        )
        .into());
    }

    let item = MarketplaceRepo::find_active(&mut *conn, item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MarketplaceItem",
            id: item_id,
        })?;

    match item.item_type.as_str() {
        MARKETPLACE_HANDICRAFT => {
            let unit_price = item.price.ok_or_else(|| {
                AppError::InternalError(format!("Handicraft {item_id} has no price"))
            })?;
            let gross = gross_amount(unit_price, i64::from(req.number_of_persons))?;
            let taken = MarketplaceRepo::take_stock(&mut *conn, item_id, req.number_of_persons)
                .await?;
            if taken.is_none() {
                let left = MarketplaceRepo::find_by_id(&mut *conn, item_id)
                    .await?
                    .map(|i| i.stock_quantity)
                    .unwrap_or(0);
                return Err(CoreError::Capacity(format!(
                    "Only {left} units of '{}' in stock, {} requested",
                    item.title, req.number_of_persons
                ))
                .into());
            }
            Ok(Admission {
                slot_id: None,
                gross,
                booking_date: req.booking_date,
                check_in_date: None,
                check_out_date: None,
            })
        }
        MARKETPLACE_HOMESTAY => {
            let nights = homestay_nights(req.check_in_date, req.check_out_date)?;
            let (Some(check_in), Some(check_out)) = (req.check_in_date, req.check_out_date)
            else {
                return Err(CoreError::Validation(
                    "check_in_date and check_out_date are required for homestay bookings".into(),
                )
                .into());
            };
            check_stay_available(&item.available_dates, check_in, check_out)?;
            let nightly = item.price_per_night.ok_or_else(|| {
                AppError::InternalError(format!("Homestay {item_id} has no nightly rate"))
            })?;
            Ok(Admission {
                slot_id: None,
                gross: gross_amount(nightly, nights)?,
                booking_date: Some(check_in),
                check_in_date: Some(check_in),
                check_out_date: Some(check_out),
            })
        }
        other => Err(AppError::InternalError(format!(
            "Marketplace item {item_id} has unknown type '{other}'"
        ))),
    }
}
