//! Repository for the `marketplace_items` table.

use ecotour_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::marketplace::{
    CreateMarketplaceItem, MarketplaceItem, MarketplaceQuery, UpdateMarketplaceItem,
};

const COLUMNS: &str = "id, item_type, title, description, location, price, price_per_night, \
                       stock_quantity, available_dates, images, is_active, is_featured, \
                       created_by, created_at, updated_at";

pub struct MarketplaceRepo;

impl MarketplaceRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateMarketplaceItem,
        created_by: DbId,
    ) -> Result<MarketplaceItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketplace_items
                (item_type, title, description, location, price, price_per_night,
                 stock_quantity, available_dates, images, is_active, is_featured, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, '{{}}'::DATE[]),
                     COALESCE($9, '[]'::JSONB), COALESCE($10, true), COALESCE($11, false), $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(&input.item_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.price_per_night)
            .bind(input.stock_quantity)
            .bind(&input.available_dates)
            .bind(&input.images)
            .bind(input.is_active)
            .bind(input.is_featured)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marketplace_items WHERE id = $1");
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_active<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM marketplace_items WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_public(
        pool: &PgPool,
        params: &MarketplaceQuery,
    ) -> Result<Vec<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_items
             WHERE is_active = true AND ($1::TEXT IS NULL OR item_type = $1)
             ORDER BY is_featured DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(&params.item_type)
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<MarketplaceItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM marketplace_items ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields in `input` are applied.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateMarketplaceItem,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_items SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                price = COALESCE($5, price),
                price_per_night = COALESCE($6, price_per_night),
                stock_quantity = COALESCE($7, stock_quantity),
                available_dates = COALESCE($8, available_dates),
                images = COALESCE($9, images),
                is_active = COALESCE($10, is_active),
                is_featured = COALESCE($11, is_featured)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.price_per_night)
            .bind(input.stock_quantity)
            .bind(&input.available_dates)
            .bind(&input.images)
            .bind(input.is_active)
            .bind(input.is_featured)
            .fetch_optional(executor)
            .await
    }

    /// Take `quantity` units of an active handicraft. Returns `None` when the
    /// item is missing, inactive, not a handicraft, or short on stock.
    pub async fn take_stock<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        quantity: i32,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_items SET stock_quantity = stock_quantity - $2
             WHERE id = $1
               AND item_type = 'handicraft'
               AND is_active = true
               AND stock_quantity >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(executor)
            .await
    }

    pub async fn restore_stock<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        quantity: i32,
    ) -> Result<Option<MarketplaceItem>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_items SET stock_quantity = stock_quantity + $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceItem>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(executor)
            .await
    }

    pub async fn has_bookings<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM bookings WHERE marketplace_item_id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM marketplace_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
