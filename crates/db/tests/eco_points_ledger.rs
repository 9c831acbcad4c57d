//! Integration tests for the eco-points ledger.
//!
//! - Balance equals the sum of ledger entries after every append
//! - Appends that would go negative write nothing
//! - Reconciliation repairs a drifted cache

use ecotour_core::eco_points::TxType;
use ecotour_db::models::profile::CreateProfile;
use ecotour_db::repositories::{EcoPointsRepo, IdentityRepo, ProfileRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    let identity = IdentityRepo::create(pool, email, "not-a-real-hash")
        .await
        .unwrap();
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id: identity.id,
            full_name: "Ledger User".to_string(),
            email: email.to_string(),
            phone: None,
            role: "user".to_string(),
        },
    )
    .await
    .unwrap();
    identity.id
}

async fn assert_consistent(pool: &PgPool, user_id: i64, expected: i64) {
    let ledger = EcoPointsRepo::balance(pool, user_id).await.unwrap();
    let cached = EcoPointsRepo::cached_balance(pool, user_id).await.unwrap();
    let profile = ProfileRepo::find_by_id(pool, user_id).await.unwrap().unwrap();
    assert_eq!(ledger, expected);
    assert_eq!(cached, expected);
    assert_eq!(profile.eco_points, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_balance_tracks_ledger_sum(pool: PgPool) {
    let user_id = seed_user(&pool, "ledger@example.com").await;
    assert_consistent(&pool, user_id, 0).await;

    let mut conn = pool.acquire().await.unwrap();
    EcoPointsRepo::append(&mut conn, user_id, 500, TxType::Earn, Some("seed"))
        .await
        .unwrap()
        .unwrap();
    EcoPointsRepo::append(&mut conn, user_id, -120, TxType::Redeem, Some("booking:1"))
        .await
        .unwrap()
        .unwrap();
    drop(conn);

    assert_consistent(&pool, user_id, 380).await;

    let history = EcoPointsRepo::list_transactions(&pool, user_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().map(|t| t.points).sum::<i64>(), 380);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overdraw_writes_nothing(pool: PgPool) {
    let user_id = seed_user(&pool, "overdraw@example.com").await;
    let mut conn = pool.acquire().await.unwrap();
    EcoPointsRepo::append(&mut conn, user_id, 500, TxType::Earn, None)
        .await
        .unwrap()
        .unwrap();

    let result = EcoPointsRepo::append(&mut conn, user_id, -600, TxType::Redeem, None)
        .await
        .unwrap();
    assert!(result.is_none());
    drop(conn);

    assert_consistent(&pool, user_id, 500).await;
    let history = EcoPointsRepo::list_transactions(&pool, user_id, 50, 0)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_check_constraint(pool: PgPool) {
    let user_id = seed_user(&pool, "sign@example.com").await;
    let mut conn = pool.acquire().await.unwrap();
    let result = EcoPointsRepo::append(&mut conn, user_id, 10, TxType::Redeem, None).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reconcile_repairs_drift(pool: PgPool) {
    let user_id = seed_user(&pool, "drift@example.com").await;
    let mut conn = pool.acquire().await.unwrap();
    EcoPointsRepo::append(&mut conn, user_id, 200, TxType::Earn, None)
        .await
        .unwrap()
        .unwrap();

    sqlx::query("UPDATE eco_points_balance SET total_points = 999 WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .unwrap();

    let report = EcoPointsRepo::reconcile(&mut conn, user_id).await.unwrap();
    drop(conn);
    assert_eq!(report.ledger_total, 200);
    assert_eq!(report.cached_before, 999);
    assert_eq!(report.drift, 799);
    assert_consistent(&pool, user_id, 200).await;
}
