//! HTTP-level integration tests for the category endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error_message, body_json, delete_auth, get, post_json_auth, put_json_auth,
    seed_user_and_token,
};
use sqlx::PgPool;

async fn create_category(
    app: axum::Router,
    token: &str,
    name: &str,
    slug: &str,
    use_in_menu: bool,
) -> serde_json::Value {
    let body = serde_json::json!({ "name": name, "slug": slug, "use_in_menu": use_in_menu });
    let response = post_json_auth(app, "/v1/category", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_round_trip(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = create_category(app.clone(), &token, "Shoes", "shoes", true).await;
    let id = created["id"].as_i64().expect("created id");
    assert_eq!(created["name"], "Shoes");
    assert_eq!(created["use_in_menu"], true);

    let response = get(app, &format!("/v1/category/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["slug"], "shoes");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_name_and_slug_are_typed_400s(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    create_category(app.clone(), &token, "Shoes", "shoes", true).await;

    let body = serde_json::json!({ "name": "Shoes", "slug": "other", "use_in_menu": false });
    let response = post_json_auth(app.clone(), "/v1/category", &token, body).await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Name already in use").await;

    let body = serde_json::json!({ "name": "Other", "slug": "shoes", "use_in_menu": false });
    let response = post_json_auth(app, "/v1/category", &token, body).await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Slug already in use").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_fields_are_rejected(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Shoes" });
    let response = post_json_auth(app, "/v1/category", &token, body).await;
    assert_error_message(
        response,
        StatusCode::BAD_REQUEST,
        "Missing required fields: slug, use_in_menu",
    )
    .await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_defaults_project_name_and_slug(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    create_category(app.clone(), &token, "Shoes", "shoes", true).await;

    let response = get(app, "/v1/category/search").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["limit"], 12);
    assert_eq!(json["page"], 1);
    let row = &json["data"][0];
    assert!(row["id"].is_number());
    assert_eq!(row["name"], "Shoes");
    assert_eq!(row["slug"], "shoes");
    assert!(row.get("use_in_menu").is_none(), "not in default fields");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_pages_are_stable_and_total_ignores_pagination(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    for i in 1..=5 {
        create_category(app.clone(), &token, &format!("Cat {i}"), &format!("cat-{i}"), true).await;
    }

    let response = get(app.clone(), "/v1/category/search?limit=2&page=2").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["page"], 2);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["data"][0]["name"], "Cat 3");
    assert_eq!(json["data"][1]["name"], "Cat 4");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unbounded_limit_returns_everything_and_reports_row_count(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    for i in 1..=3 {
        create_category(app.clone(), &token, &format!("Cat {i}"), &format!("cat-{i}"), true).await;
    }

    // `page` is ignored when the limit is unbounded.
    let response = get(app, "/v1/category/search?limit=-1&page=7").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["limit"], 3, "unbounded limit reports the row count");
    assert_eq!(json["page"], 1);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(3));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_rejects_bad_pagination_and_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/v1/category/search?limit=0").await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Invalid limit").await;

    let response = get(app.clone(), "/v1/category/search?limit=abc").await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Invalid limit").await;

    let response = get(app.clone(), "/v1/category/search?page=0").await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Invalid page").await;

    let response = get(app.clone(), "/v1/category/search?fields=name,password").await;
    assert_error_message(response, StatusCode::BAD_REQUEST, "Unknown field: password").await;

    let response = get(app, "/v1/category/search?use_in_menu=1").await;
    assert_error_message(
        response,
        StatusCode::BAD_REQUEST,
        "use_in_menu must be true or false",
    )
    .await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn use_in_menu_filter_narrows_results(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    create_category(app.clone(), &token, "Visible", "visible", true).await;
    create_category(app.clone(), &token, "Hidden", "hidden", false).await;

    let response = get(app, "/v1/category/search?use_in_menu=true&fields=name,use_in_menu").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "Visible");
    assert_eq!(json["data"][0]["use_in_menu"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_and_delete_round_trip(pool: PgPool) {
    let (_, token) = seed_user_and_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = create_category(app.clone(), &token, "Shoes", "shoes", true).await;
    let id = created["id"].as_i64().expect("created id");

    let body = serde_json::json!({ "name": "Boots", "slug": "boots", "use_in_menu": false });
    let response = put_json_auth(app.clone(), &format!("/v1/category/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/v1/category/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Boots");
    assert_eq!(json["use_in_menu"], false);

    let response = delete_auth(app.clone(), &format!("/v1/category/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/v1/category/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/v1/category/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
