//! Catalog vocabulary and validation for experiences, slots, marketplace
//! listings, and reviews.

use crate::error::CoreError;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Experience categories
// ---------------------------------------------------------------------------

pub const CATEGORY_AGRICULTURE: &str = "Agriculture";
pub const CATEGORY_ART_AND_CRAFT: &str = "Art & Craft";
pub const CATEGORY_VILLAGE_LIFE: &str = "Village Life";
pub const CATEGORY_FOOD: &str = "Food";

pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_AGRICULTURE,
    CATEGORY_ART_AND_CRAFT,
    CATEGORY_VILLAGE_LIFE,
    CATEGORY_FOOD,
];

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Marketplace listing types
// ---------------------------------------------------------------------------

pub const MARKETPLACE_HANDICRAFT: &str = "handicraft";
pub const MARKETPLACE_HOMESTAY: &str = "homestay";

pub const VALID_MARKETPLACE_TYPES: &[&str] = &[MARKETPLACE_HANDICRAFT, MARKETPLACE_HOMESTAY];

pub fn validate_marketplace_type(item_type: &str) -> Result<(), CoreError> {
    if VALID_MARKETPLACE_TYPES.contains(&item_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid marketplace type '{item_type}'. Must be one of: {}",
            VALID_MARKETPLACE_TYPES.join(", ")
        )))
    }
}

/// A listing must carry the price field its type is billed by.
///
/// Handicrafts are billed per unit (`price`), homestays per night
/// (`price_per_night`).
pub fn validate_listing_pricing(
    item_type: &str,
    price: Option<Money>,
    price_per_night: Option<Money>,
) -> Result<(), CoreError> {
    let required = match item_type {
        MARKETPLACE_HANDICRAFT => ("price", price),
        MARKETPLACE_HOMESTAY => ("price_per_night", price_per_night),
        other => return validate_marketplace_type(other),
    };
    match required.1 {
        Some(p) => validate_price(required.0, p),
        None => Err(CoreError::Validation(format!(
            "{} is required for {item_type} listings",
            required.0
        ))),
    }
}

// ---------------------------------------------------------------------------
// Shared field checks
// ---------------------------------------------------------------------------

pub fn validate_price(field: &str, price: Money) -> Result<(), CoreError> {
    if price.is_sign_negative() {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    Ok(())
}

/// A slot's capacity must be positive and never drop below what is booked.
pub fn validate_slot_capacity(max_capacity: i32, booked_capacity: i32) -> Result<(), CoreError> {
    if max_capacity < 1 {
        return Err(CoreError::Validation(
            "max_capacity must be at least 1".into(),
        ));
    }
    if max_capacity < booked_capacity {
        return Err(CoreError::Conflict(format!(
            "max_capacity {max_capacity} is below the {booked_capacity} places already booked"
        )));
    }
    Ok(())
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}
