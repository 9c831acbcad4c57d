//! Eco-points arithmetic and ledger conventions.
//!
//! Ledger entries carry a signed delta: `earn` entries are positive, `redeem`
//! entries are negative. The transaction type is metadata and must agree with
//! the sign.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Money};

/// Ledger transaction type. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Earn,
    Redeem,
}

impl TxType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Earn => "earn",
            TxType::Redeem => "redeem",
        }
    }
}

/// Check that a delta is non-zero and its sign agrees with the type.
pub fn validate_delta(tx_type: TxType, delta: i64) -> Result<(), CoreError> {
    match tx_type {
        TxType::Earn if delta > 0 => Ok(()),
        TxType::Redeem if delta < 0 => Ok(()),
        TxType::Earn => Err(CoreError::Validation(format!(
            "earn transactions require a positive delta, got {delta}"
        ))),
        TxType::Redeem => Err(CoreError::Validation(format!(
            "redeem transactions require a negative delta, got {delta}"
        ))),
    }
}

/// Ledger reference for the points a booking redeems or earns.
pub fn booking_reference(booking_id: DbId) -> String {
    format!("booking:{booking_id}")
}

/// Ledger reference for the refund of a cancelled booking's redemption.
pub fn refund_reference(booking_id: DbId) -> String {
    format!("booking:{booking_id}:refund")
}

/// Earning and redemption parameters (the `eco_points_config` row).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcoPointsRules {
    /// Points earned per currency unit of a completed booking.
    pub earn_multiplier: Decimal,
    /// Bookings below this amount earn nothing.
    pub min_booking_amount: Money,
    /// Currency value of one redeemed point.
    pub redeem_value: Money,
}

impl Default for EcoPointsRules {
    fn default() -> Self {
        Self {
            earn_multiplier: Decimal::new(5, 2),
            min_booking_amount: Decimal::from(100),
            redeem_value: Decimal::ONE,
        }
    }
}

impl EcoPointsRules {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.earn_multiplier.is_sign_negative() {
            return Err(CoreError::Validation(
                "earn_multiplier must not be negative".into(),
            ));
        }
        if self.min_booking_amount.is_sign_negative() {
            return Err(CoreError::Validation(
                "min_booking_amount must not be negative".into(),
            ));
        }
        if self.redeem_value <= Decimal::ZERO {
            return Err(CoreError::Validation(
                "redeem_value must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Points earned on completion of a booking worth `total_amount`.
    ///
    /// Rounded down; zero below `min_booking_amount`.
    pub fn points_earned(&self, total_amount: Money) -> i64 {
        if total_amount < self.min_booking_amount {
            return 0;
        }
        (total_amount * self.earn_multiplier)
            .floor()
            .to_i64()
            .unwrap_or(0)
            .max(0)
    }

    /// Currency value of `points` when redeemed.
    pub fn redemption_value(&self, points: i64) -> Money {
        Decimal::from(points) * self.redeem_value
    }
}

/// Points a booking may redeem must be non-negative.
pub fn validate_points_used(points: i64) -> Result<(), CoreError> {
    if points < 0 {
        return Err(CoreError::Validation(
            "eco_points_used must not be negative".into(),
        ));
    }
    Ok(())
}
