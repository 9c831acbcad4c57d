//! Admin media upload through the object storage seam.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{
    assert_error, body_bytes, body_json, build_test_app_with, build_test_app_with_storage_root,
    get, get_auth, seed_with_token, test_config,
};
use ecotour_api::auth::identity::PgIdentityProvider;
use ecotour_core::error::CoreError;
use ecotour_core::storage::ObjectStorage;
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "ecotour-test-boundary";

fn multipart_body(file_name: &str, bytes: &[u8], bucket: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(bucket) = bucket {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"bucket\"\r\n\r\n{bucket}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: Router, token: &str, body: Vec<u8>) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/upload-media")
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_upload_stores_object_and_records_it(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (admin_id, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let app = build_test_app_with_storage_root(pool.clone(), root.path());

    let body = multipart_body("Hero.PNG", b"fake-png-bytes", None);
    let response = upload(app, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let path = json["media"]["path"].as_str().unwrap().to_string();
    assert!(path.starts_with("uploads/"));
    assert!(path.ends_with(".png"));
    assert_eq!(json["media"]["bucket"], "public-media");
    assert_eq!(json["media"]["uploaded_by"], admin_id);
    assert_eq!(json["media"]["meta"]["originalName"], "Hero.PNG");
    assert_eq!(
        json["url"],
        format!("http://localhost:3000/media/public-media/{path}")
    );

    let stored = std::fs::read(root.path().join("public-media").join(&path)).unwrap();
    assert_eq!(stored, b"fake-png-bytes");

    let (action,): (String,) =
        sqlx::query_as("SELECT action FROM admin_audit WHERE object_type = 'media'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(action, "UPLOAD");

    let app = build_test_app_with_storage_root(pool, root.path());
    let response = get_auth(app, "/api/v1/admin/media", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_served_media_is_sandboxed(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let app = build_test_app_with_storage_root(pool.clone(), root.path());
    let response = upload(app, &token, multipart_body("trail.png", b"png-bytes", None)).await;
    let json = body_json(response).await;
    let path = json["media"]["path"].as_str().unwrap().to_string();

    let app = build_test_app_with_storage_root(pool, root.path());
    let response = get(app, &format!("/media/public-media/{path}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let csp = response.headers()["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("sandbox"));
    assert_eq!(body_bytes(response).await, b"png-bytes");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_honours_named_bucket(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let app = build_test_app_with_storage_root(pool, root.path());

    let body = multipart_body("map.pdf", b"%PDF-1.7", Some("site-docs"));
    let response = upload(app, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["media"]["bucket"], "site-docs");
    let path = json["media"]["path"].as_str().unwrap();
    assert!(root.path().join("site-docs").join(path).exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsupported_extension_is_rejected(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let app = build_test_app_with_storage_root(pool.clone(), root.path());

    let response = upload(app, &token, multipart_body("run.sh", b"#!/bin/sh", None)).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let app = build_test_app_with_storage_root(pool.clone(), root.path());
    let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>";
    let response = upload(app, &token, multipart_body("logo.svg", svg, None)).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    assert_eq!(count(&pool, "media").await, 0);
    assert!(!root.path().join("public-media").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_bucket_and_empty_file_are_rejected(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;

    let app = build_test_app_with_storage_root(pool.clone(), root.path());
    let body = multipart_body("a.png", b"x", Some("../escape"));
    let response = upload(app, &token, body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let app = build_test_app_with_storage_root(pool.clone(), root.path());
    let response = upload(app, &token, multipart_body("a.png", b"", None)).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert_eq!(count(&pool, "media").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_upload_is_forbidden(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let (_, token) = seed_with_token(&pool, "user@example.com", "user").await;
    let app = build_test_app_with_storage_root(pool.clone(), root.path());

    let response = upload(app, &token, multipart_body("a.png", b"png", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(count(&pool, "media").await, 0);
}

/// Storage that is always down.
#[derive(Default)]
struct UnreachableStorage {
    attempts: AtomicU32,
}

#[async_trait]
impl ObjectStorage for UnreachableStorage {
    async fn upload(
        &self,
        _bucket: &str,
        _path: &str,
        _bytes: &[u8],
        _content_type: Option<&str>,
    ) -> Result<String, CoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::ExternalService("connection refused by 10.1.2.3".into()))
    }

    async fn delete(&self, _bucket: &str, _path: &str) -> Result<(), CoreError> {
        Ok(())
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storage_outage_is_retried_then_reported_as_502(pool: PgPool) {
    let (_, token) = seed_with_token(&pool, "admin@example.com", "admin").await;
    let storage = Arc::new(UnreachableStorage::default());
    let config = test_config();
    let max_attempts = config.storage.max_attempts;
    let app = build_test_app_with(
        pool.clone(),
        config,
        Arc::new(PgIdentityProvider::new(pool.clone())),
        storage.clone(),
    );

    let response = upload(app, &token, multipart_body("a.png", b"png", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EXTERNAL_SERVICE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("10.1.2.3"));

    assert_eq!(storage.attempts.load(Ordering::SeqCst), max_attempts);
    assert_eq!(count(&pool, "media").await, 0);
}
