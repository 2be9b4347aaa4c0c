//! Shared helpers for the HTTP-level integration tests.
//!
//! Each test gets its own migrated database from `#[sqlx::test]`; the app
//! is built through the production router so every test exercises the full
//! middleware stack.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use catalog_api::auth::jwt::{generate_token, JwtConfig};
use catalog_api::auth::password::hash_password;
use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_db::models::user::CreateUser;
use catalog_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry_mins: 60,
        },
    }
}

/// Build the full application router against the given pool, mirroring
/// `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create a user directly in the database and return `(user id, token)`
/// for authenticated requests.
pub async fn seed_user_and_token(pool: &PgPool) -> (i64, String) {
    let password_hash = hash_password("seed-password-123").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            firstname: "Seed".to_string(),
            surname: "User".to_string(),
            email: "seed@test.com".to_string(),
            password_hash,
        },
    )
    .await
    .expect("seed user creation should succeed");

    let token = generate_token(user.id, &user.email, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a `{"message": ...}` error body with the exact expected message.
pub async fn assert_error_message(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["message"], message);
}
