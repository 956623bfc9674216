//! HTTP-level integration tests for the todo endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Categories are created through the API so each test starts from an empty
//! database.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with_config, delete, get, get_as, patch,
    post_json, put_json, test_config,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_category(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let resp = post_json(app, "/api/v1/categories", json!({ "name": name })).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["data"]["id"].as_i64().unwrap()
}

async fn create_todo(pool: &PgPool, category: &str, title: &str, rank: i32) -> i64 {
    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/api/v1/todos",
        json!({ "title": title, "rank": rank, "category_name": category }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["data"]["id"].as_i64().unwrap()
}

async fn rank_of(pool: &PgPool, id: i64) -> i64 {
    let app = build_test_app(pool.clone());
    let resp = get(app, &format!("/api/v1/todos/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["data"]["rank"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: POST /todos shifts on collision
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_shifts_existing_ranks(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    let resp = post_json(
        app,
        "/api/v1/todos",
        json!({ "title": "C", "rank": 1, "category_name": "Work", "description": "urgent" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["data"]["rank"], 1);
    assert_eq!(created["data"]["done"], false);
    assert_eq!(created["data"]["category_name"], "Work");
    assert_eq!(created["data"]["description"], "urgent");

    assert_eq!(rank_of(&pool, a).await, 2);
    assert_eq!(rank_of(&pool, b).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_validation_errors(pool: PgPool) {
    create_category(&pool, "Work").await;

    let cases = [
        json!({ "title": "A", "rank": 0, "category_name": "Work" }),
        json!({ "title": "A", "rank": 101, "category_name": "Work" }),
        json!({ "title": "   ", "rank": 1, "category_name": "Work" }),
        json!({ "title": "x".repeat(101), "rank": 1, "category_name": "Work" }),
        json!({ "title": "A", "rank": 1 }),
    ];
    for body in cases {
        let app = build_test_app(pool.clone());
        let resp = post_json(app, "/api/v1/todos", body.clone()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(resp).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_in_unknown_category_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let resp = post_json(
        app,
        "/api/v1/todos",
        json!({ "title": "A", "rank": 1, "category_name": "Nowhere" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: PUT /todos/{id} partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rank_shifts_and_keeps_other_fields(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    let resp = put_json(app, &format!("/api/v1/todos/{b}"), json!({ "rank": 1 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["rank"], 1);
    assert_eq!(json["data"]["title"], "B");

    assert_eq!(rank_of(&pool, a).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_null_title_is_rejected(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;

    let app = build_test_app(pool);
    let resp = put_json(app, &format!("/api/v1/todos/{a}"), json!({ "title": null })).await;
    assert!(resp.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let resp = put_json(app, "/api/v1/todos/999", json!({ "rank": 2 })).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: PATCH /todos/{id}/toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_flips_done(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 5).await;

    let app = build_test_app(pool.clone());
    let resp = patch(app, &format!("/api/v1/todos/{a}/toggle")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"]["done"], true);
    assert_eq!(json["data"]["rank"], 5);
}

// ---------------------------------------------------------------------------
// Test: PUT /todos/reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_returns_refreshed_todos(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    let resp = put_json(
        app,
        "/api/v1/todos/reorder",
        json!([{ "id": b, "rank": 1 }, { "id": a, "rank": 2 }]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], b);
    assert_eq!(data[0]["rank"], 1);
    assert_eq!(data[1]["id"], a);
    assert_eq!(data[1]["rank"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_unknown_id_changes_nothing(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    let resp = put_json(
        app,
        "/api/v1/todos/reorder",
        json!([{ "id": b, "rank": 1 }, { "id": 31337, "rank": 3 }, { "id": a, "rank": 2 }]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("31337"));

    assert_eq!(rank_of(&pool, a).await, 1);
    assert_eq!(rank_of(&pool, b).await, 2);
}

// ---------------------------------------------------------------------------
// Test: DELETE /todos/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_keeps_sibling_ranks(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    let resp = delete(app, &format!("/api/v1/todos/{a}")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert_eq!(rank_of(&pool, b).await, 2);

    let app = build_test_app(pool);
    let resp = get(app, &format!("/api/v1/todos/{a}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: listing and owner scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_category_orders_active_first(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;
    let b = create_todo(&pool, "Work", "B", 2).await;

    let app = build_test_app(pool.clone());
    patch(app, &format!("/api/v1/todos/{a}/toggle")).await;

    let app = build_test_app(pool);
    let resp = get(app, "/api/v1/todos/category/Work").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_owner_sees_nothing(pool: PgPool) {
    create_category(&pool, "Work").await;
    let a = create_todo(&pool, "Work", "A", 1).await;

    let app = build_test_app(pool.clone());
    let resp = get_as(app, "/api/v1/todos", 2).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 0);

    let app = build_test_app(pool);
    let resp = get_as(app, &format!("/api/v1/todos/{a}"), 2).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_owner_is_unauthorized_without_default(pool: PgPool) {
    let config = todorank_api::config::ServerConfig {
        default_owner_id: None,
        ..test_config()
    };
    let app = build_test_app_with_config(pool, config);
    let resp = get(app, "/api/v1/todos").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_owner_header_is_bad_request(pool: PgPool) {
    let app = build_test_app(pool);
    let request = axum::http::Request::builder()
        .uri("/api/v1/todos")
        .header("x-owner-id", "not-a-number")
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
