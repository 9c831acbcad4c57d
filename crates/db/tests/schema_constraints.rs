//! Integration tests for table-level invariants.

use ecotour_db::models::booking::CreateBooking;
use ecotour_db::models::profile::CreateProfile;
use ecotour_db::repositories::{
    BookingRepo, EcoPointsConfigRepo, IdentityRepo, ProfileRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool) -> i64 {
    let identity = IdentityRepo::create(pool, "guest@example.com", "not-a-real-hash")
        .await
        .unwrap();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id: identity.id,
            full_name: "Guest".to_string(),
            email: identity.email.clone(),
            phone: None,
            role: "user".to_string(),
        },
    )
    .await
    .unwrap();
    identity.id
}

fn untargeted_booking(user_id: i64) -> CreateBooking {
    CreateBooking {
        user_id,
        experience_id: None,
        marketplace_item_id: None,
        slot_id: None,
        guest_name: "Guest".to_string(),
        guest_email: "guest@example.com".to_string(),
        guest_phone: None,
        number_of_persons: 1,
        booking_date: None,
        check_in_date: None,
        check_out_date: None,
        total_amount: Decimal::ZERO,
        eco_points_used: 0,
        notes: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_requires_exactly_one_target(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let err = BookingRepo::create(&pool, &untargeted_booking(user_id))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("ck_bookings_single_target"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_identity_email_is_unique_violation(pool: PgPool) {
    IdentityRepo::create(&pool, "dup@example.com", "h").await.unwrap();
    let err = IdentityRepo::create(&pool, "dup@example.com", "h")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_identities_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_eco_points_config_is_seeded_with_defaults(pool: PgPool) {
    let config = EcoPointsConfigRepo::get(&pool).await.unwrap();
    assert_eq!(config.earn_multiplier, Decimal::new(5, 2));
    assert_eq!(config.min_booking_amount, Decimal::from(100));
    assert_eq!(config.redeem_value, Decimal::ONE);
}
