#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use todorank_api::config::ServerConfig;
use todorank_api::router::build_app_router;
use todorank_api::state::AppState;

/// Owner used when a request sends no `X-Owner-Id` header.
pub const DEFAULT_OWNER: i64 = 1;

/// Build a test `ServerConfig` with safe defaults and a default owner.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_owner_id: Some(DEFAULT_OWNER),
        seed_default_categories: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(config),
    })
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri)).await
}

/// GET as a specific owner via the `X-Owner-Id` header.
pub async fn get_as(app: Router, uri: &str, owner_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("x-owner-id", owner_id.to_string())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::PATCH, uri)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
