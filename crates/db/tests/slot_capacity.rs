//! Integration tests for slot capacity accounting.
//!
//! - Concurrent reservations never overshoot `max_capacity`
//! - A full slot closes and reopens on release
//! - Admin-closed slots stay closed after a release

use chrono::NaiveDate;
use ecotour_db::models::experience::CreateExperience;
use ecotour_db::models::profile::CreateProfile;
use ecotour_db::models::slot::{CreateSlot, ExperienceSlot, UpdateSlot};
use ecotour_db::repositories::{ExperienceRepo, IdentityRepo, ProfileRepo, SlotRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_admin(pool: &PgPool) -> i64 {
    let identity = IdentityRepo::create(pool, "seed-admin@example.com", "not-a-real-hash")
        .await
        .unwrap();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id: identity.id,
            full_name: "Seed Admin".to_string(),
            email: identity.email.clone(),
            phone: None,
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap();
    identity.id
}

async fn seed_slot(pool: &PgPool, max_capacity: i32) -> ExperienceSlot {
    let admin_id = seed_admin(pool).await;
    let experience = ExperienceRepo::create(
        pool,
        &CreateExperience {
            title: "Paddy Planting".to_string(),
            description: None,
            category: "Agriculture".to_string(),
            location: Some("Kerala".to_string()),
            image_url: None,
            price: Decimal::from(500),
            is_active: None,
            is_featured: None,
            provider_id: None,
        },
        admin_id,
    )
    .await
    .unwrap();
    SlotRepo::create(
        pool,
        experience.id,
        &CreateSlot {
            slot_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            slot_time: None,
            max_capacity,
            price_override: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reserve_fills_and_closes_slot(pool: PgPool) {
    let slot = seed_slot(&pool, 2).await;

    let reserved = SlotRepo::reserve(&pool, slot.id, 2).await.unwrap().unwrap();
    assert_eq!(reserved.booked_capacity, 2);
    assert!(!reserved.is_available);

    let rejected = SlotRepo::reserve(&pool, slot.id, 1).await.unwrap();
    assert!(rejected.is_none());

    let after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(after.booked_capacity, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reserve_rejects_oversized_party(pool: PgPool) {
    let slot = seed_slot(&pool, 3).await;
    assert!(SlotRepo::reserve(&pool, slot.id, 4).await.unwrap().is_none());
    let after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(after.booked_capacity, 0);
    assert!(after.is_available);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_reservations_never_exceed_capacity(pool: PgPool) {
    let slot = seed_slot(&pool, 5).await;

    let attempts = (0..20).map(|_| {
        let pool = pool.clone();
        async move { SlotRepo::reserve(&pool, slot.id, 1).await.unwrap() }
    });
    let results = futures::future::join_all(attempts).await;
    let admitted = results.iter().filter(|r| r.is_some()).count();

    assert_eq!(admitted, 5);
    let after = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert_eq!(after.booked_capacity, 5);
    assert!(!after.is_available);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_reopens_full_slot(pool: PgPool) {
    let slot = seed_slot(&pool, 2).await;
    SlotRepo::reserve(&pool, slot.id, 2).await.unwrap().unwrap();

    let released = SlotRepo::release(&pool, slot.id, 2).await.unwrap().unwrap();
    assert_eq!(released.booked_capacity, 0);
    assert!(released.is_available);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_keeps_admin_closed_slot_closed(pool: PgPool) {
    let slot = seed_slot(&pool, 4).await;
    SlotRepo::reserve(&pool, slot.id, 1).await.unwrap().unwrap();
    SlotRepo::update(
        &pool,
        slot.id,
        &UpdateSlot {
            is_available: Some(false),
            ..UpdateSlot::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let released = SlotRepo::release(&pool, slot.id, 1).await.unwrap().unwrap();
    assert_eq!(released.booked_capacity, 0);
    assert!(!released.is_available);
    assert!(SlotRepo::reserve(&pool, slot.id, 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_capacity_check_constraint_rejects_shrink(pool: PgPool) {
    let slot = seed_slot(&pool, 4).await;
    SlotRepo::reserve(&pool, slot.id, 3).await.unwrap().unwrap();

    let result = SlotRepo::update(
        &pool,
        slot.id,
        &UpdateSlot {
            max_capacity: Some(2),
            ..UpdateSlot::default()
        },
    )
    .await;
    assert!(result.is_err());
}
