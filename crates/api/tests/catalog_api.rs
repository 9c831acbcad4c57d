//! Admin catalog management and the public catalog.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::{
    assert_error, body_json, build_test_app, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, seed_with_token,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_experience(pool: &PgPool, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/experiences",
        token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn experience_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "category": "Village Life",
        "price": 250,
        "location": "Hill hamlet",
    })
}

async fn create_slot(pool: &PgPool, token: &str, experience_id: i64, max_capacity: i32) -> i64 {
    let slot_date = Utc::now().date_naive() + Days::new(14);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/experiences/{experience_id}/slots"),
        token,
        json!({ "slot_date": slot_date, "max_capacity": max_capacity }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn audit_count(pool: &PgPool, object_type: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_audit WHERE object_type = $1")
        .bind(object_type)
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

// ---------------------------------------------------------------------------
// Experiences
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_crud_is_audited_and_public_sees_active_only(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    let visible = create_experience(&pool, &token, experience_body("Pottery Class")).await;
    let hidden = create_experience(&pool, &token, experience_body("Retired Walk")).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/experiences/{hidden}"),
        &token,
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_active"], false);

    let response = get(build_test_app(pool.clone()), "/api/v1/experiences").await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![visible]);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/experiences/{hidden}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/experiences",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/experiences/{hidden}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // create x2, update, delete
    assert_eq!(audit_count(&pool, "experience").await, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_category_and_negative_price_are_rejected(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    let mut body = experience_body("Bad Category");
    body["category"] = json!("Skydiving");
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/experiences",
        &token,
        body,
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let mut body = experience_body("Negative");
    body["price"] = json!(-5);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/experiences",
        &token,
        body,
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = get(
        build_test_app(pool),
        "/api/v1/experiences?category=Skydiving",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_cannot_manage_catalog(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "user@example.com", "user").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/experiences",
        &token,
        experience_body("Sneaky"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM experiences")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(n, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_experience_with_bookings_cannot_be_deleted(pool: PgPool) {
    let (_, admin_token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let (_, user_token) = seed_with_token(&pool, "user@example.com", "user").await;
    let experience_id = create_experience(&pool, &admin_token, experience_body("Weaving")).await;
    let slot_id = create_slot(&pool, &admin_token, experience_id, 4).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/bookings",
        &user_token,
        json!({
            "guest_name": "Guest",
            "guest_email": "guest@example.com",
            "experience_id": experience_id,
            "slot_id": slot_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/experiences/{experience_id}"),
        &admin_token,
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/experiences/{experience_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_slot_capacity_cannot_shrink_below_booked(pool: PgPool) {
    let (_, admin_token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let (_, user_token) = seed_with_token(&pool, "user@example.com", "user").await;
    let experience_id = create_experience(&pool, &admin_token, experience_body("Harvest")).await;
    let slot_id = create_slot(&pool, &admin_token, experience_id, 4).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/bookings",
        &user_token,
        json!({
            "guest_name": "Guest",
            "guest_email": "guest@example.com",
            "experience_id": experience_id,
            "slot_id": slot_id,
            "number_of_persons": 3,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/slots/{slot_id}"),
        &admin_token,
        json!({ "max_capacity": 2 }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/slots/{slot_id}"),
        &admin_token,
        json!({ "max_capacity": 6 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["max_capacity"], 6);
    assert_eq!(json["data"]["booked_capacity"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_slot_list_hides_closed_slots(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let experience_id = create_experience(&pool, &token, experience_body("Cooking")).await;
    let open = create_slot(&pool, &token, experience_id, 4).await;
    let closed = create_slot(&pool, &token, experience_id, 4).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/slots/{closed}"),
        &token,
        json!({ "is_available": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/experiences/{experience_id}/slots"),
    )
    .await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![open]);
}

// ---------------------------------------------------------------------------
// Marketplace
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listings_need_the_price_of_their_type(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/marketplace",
        &token,
        json!({ "item_type": "homestay", "title": "Riverside Room", "price": 30 }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/marketplace",
        &token,
        json!({ "item_type": "boat", "title": "Canoe", "price": 30 }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/marketplace",
        &token,
        json!({ "item_type": "homestay", "title": "Riverside Room", "price_per_night": 30 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(build_test_app(pool), "/api/v1/marketplace?type=homestay").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["price_per_night"].as_f64(), Some(30.0));
}

// ---------------------------------------------------------------------------
// Reviews, content, eco-points config
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_review_per_user_and_experience(pool: PgPool) {
    let (_, admin_token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let (_, user_token) = seed_with_token(&pool, "user@example.com", "user").await;
    let experience_id = create_experience(&pool, &admin_token, experience_body("Tea")).await;
    let uri = format!("/api/v1/experiences/{experience_id}/reviews");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        &user_token,
        json!({ "rating": 5, "comment": "Lovely" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        &user_token,
        json!({ "rating": 4 }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        &admin_token,
        json!({ "rating": 9 }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_upsert_is_public_and_audited(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    for value in ["Welcome", "Welcome back"] {
        let response = put_json_auth(
            build_test_app(pool.clone()),
            "/api/v1/admin/content/home.hero",
            &token,
            json!({ "value": value }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(build_test_app(pool.clone()), "/api/v1/content").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["key"], "home.hero");
    assert_eq!(json["data"][0]["value"], "Welcome back");
    assert_eq!(audit_count(&pool, "cms_text").await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_eco_points_config_updates_are_validated(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/eco-points/config",
        &token,
        json!({ "redeem_value": 0 }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/eco-points/config",
        &token,
        json!({ "earn_multiplier": 0.1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/eco-points/config",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["earn_multiplier"].as_f64(), Some(0.1));
    assert_eq!(json["data"]["redeem_value"].as_f64(), Some(1.0));
    assert_eq!(audit_count(&pool, "eco_points_config").await, 1);
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provider_registration_and_verification(pool: PgPool) {
    let (_, admin_token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let (owner_id, provider_token) =
        seed_with_token(&pool, "farm@example.com", "provider").await;
    let (_, user_token) = seed_with_token(&pool, "user@example.com", "user").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/providers",
        &user_token,
        json!({ "name": "Not A Provider" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/providers",
        &provider_token,
        json!({ "name": "Green Terrace Farm" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner_profile_id"], owner_id);
    assert!(json["data"]["verified"].is_null());
    let provider_id = json["data"]["id"].as_i64().unwrap();

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/providers?status=pending",
        &admin_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/providers/{provider_id}/verification"),
        &admin_token,
        json!({ "verified": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["verified"], true);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/admin/providers?status=bogus",
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
