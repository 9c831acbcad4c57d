/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (booking, check-in, slot dates) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Monetary amounts are fixed-point decimals (`NUMERIC(12,2)` in the database).
pub type Money = rust_decimal::Decimal;
