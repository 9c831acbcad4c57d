#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use ecotour_api::auth::identity::PgIdentityProvider;
use ecotour_api::auth::jwt::{generate_access_token, JwtConfig};
use ecotour_api::config::{ServerConfig, StorageConfig};
use ecotour_api::router::build_app_router;
use ecotour_api::state::AppState;
use ecotour_api::storage::LocalObjectStorage;
use ecotour_core::eco_points::TxType;
use ecotour_core::identity::IdentityProvider;
use ecotour_core::storage::ObjectStorage;
use ecotour_core::types::DbId;
use ecotour_db::models::profile::CreateProfile;
use ecotour_db::repositories::{EcoPointsRepo, ProfileRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password of every seeded account.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Storage lands in a fresh directory under the system temp dir; pass a
/// storage backend to [`build_test_app_with`] to control it.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        storage: StorageConfig {
            root: std::env::temp_dir().join(format!("ecotour-test-{}", uuid::Uuid::new_v4())),
            public_url: "http://localhost:3000/media".to_string(),
            timeout_secs: 5,
            max_attempts: 2,
            max_upload_bytes: 1024 * 1024,
        },
    }
}

/// Build the full application router with the production middleware stack,
/// the PostgreSQL identity provider and local object storage.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let storage = Arc::new(LocalObjectStorage::new(
        &config.storage.root,
        &config.storage.public_url,
    ));
    let identity = Arc::new(PgIdentityProvider::new(pool.clone()));
    build_test_app_with(pool, config, identity, storage)
}

/// Build the app with a storage root the test controls.
pub fn build_test_app_with_storage_root(pool: PgPool, root: &Path) -> Router {
    let mut config = test_config();
    config.storage.root = root.to_path_buf();
    let storage = Arc::new(LocalObjectStorage::new(root, &config.storage.public_url));
    let identity = Arc::new(PgIdentityProvider::new(pool.clone()));
    build_test_app_with(pool, config, identity, storage)
}

/// Build the app around explicit collaborators.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity,
        storage,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create an identity with [`TEST_PASSWORD`] and a profile with `role`.
pub async fn seed_profile(pool: &PgPool, email: &str, role: &str) -> DbId {
    let identity = PgIdentityProvider::new(pool.clone());
    let id = identity
        .create_identity(email, TEST_PASSWORD)
        .await
        .expect("identity creation should succeed");
    ProfileRepo::create(
        pool,
        &CreateProfile {
            id,
            full_name: format!("Test {role}"),
            email: email.to_string(),
            phone: None,
            role: role.to_string(),
        },
    )
    .await
    .expect("profile creation should succeed");
    id
}

/// Seed a profile and return its id with a valid access token.
pub async fn seed_with_token(pool: &PgPool, email: &str, role: &str) -> (DbId, String) {
    let id = seed_profile(pool, email, role).await;
    (id, token_for(id, role))
}

/// Issue a token signed with the test secret. The role claim is whatever
/// the caller asks for.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

/// Credit `points` to a user's ledger.
pub async fn grant_points(pool: &PgPool, user_id: DbId, points: i64) {
    let mut conn = pool.acquire().await.unwrap();
    EcoPointsRepo::append(&mut conn, user_id, points, TxType::Earn, Some("test-grant"))
        .await
        .unwrap()
        .expect("grant should be accepted");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and error code of an error response.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}
