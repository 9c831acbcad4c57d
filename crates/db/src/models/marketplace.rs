//! Marketplace listing (handicraft / homestay) model and DTOs.

use ecotour_core::types::{Date, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `marketplace_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketplaceItem {
    pub id: DbId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Unit price of a handicraft.
    pub price: Option<Money>,
    /// Nightly rate of a homestay.
    pub price_per_night: Option<Money>,
    pub stock_quantity: i32,
    /// Bookable nights of a homestay. Empty means unrestricted.
    pub available_dates: Vec<Date>,
    pub images: serde_json::Value,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarketplaceItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price: Option<Money>,
    pub price_per_night: Option<Money>,
    pub stock_quantity: Option<i32>,
    pub available_dates: Option<Vec<Date>>,
    pub images: Option<serde_json::Value>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// DTO for updating a listing. All fields are optional; the type is fixed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMarketplaceItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price: Option<Money>,
    pub price_per_night: Option<Money>,
    pub stock_quantity: Option<i32>,
    pub available_dates: Option<Vec<Date>>,
    pub images: Option<serde_json::Value>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Public list filter (`?type=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketplaceQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}
