//! HTTP-level tests for the `/tags` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_tag_is_idempotent_by_name(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "cook", false).await;
    let app = common::build_test_app(pool);

    let first = post_json_auth(
        app.clone(),
        "/api/v1/tags",
        json!({ "name": " Spicy ", "color": "#FF0000" }),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await["data"].clone();
    assert_eq!(first["name"], "spicy");
    assert_eq!(first["color"], "#FF0000");

    let second = post_json_auth(app, "/api/v1/tags", json!({ "name": "SPICY" }), &token).await;
    let second = body_json(second).await["data"].clone();
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["color"], "#FF0000");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_tag_validates_name_and_color(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "cook", false).await;
    let app = common::build_test_app(pool);

    let short = post_json_auth(app.clone(), "/api/v1/tags", json!({ "name": "a" }), &token).await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let color = post_json_auth(
        app,
        "/api/v1/tags",
        json!({ "name": "sweet", "color": "pink" }),
        &token,
    )
    .await;
    assert_eq!(color.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tag_reads_require_authentication(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "cook", false).await;
    let app = common::build_test_app(pool);

    assert_eq!(get(app.clone(), "/api/v1/tags").await.status(), StatusCode::UNAUTHORIZED);

    for name in ["zesty", "baked", "mild"] {
        post_json_auth(app.clone(), "/api/v1/tags", json!({ "name": name }), &token).await;
    }

    let json = body_json(get_auth(app.clone(), "/api/v1/tags?limit=2", &token).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["baked", "mild"]);

    let missing = get_auth(app, "/api/v1/tags/999", &token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_admins_update_and_delete_tags(pool: PgPool) {
    let (_, user_token) = common::create_user_with_token(&pool, "cook", false).await;
    let (_, admin_token) = common::create_user_with_token(&pool, "admin", true).await;
    let app = common::build_test_app(pool);

    let created =
        post_json_auth(app.clone(), "/api/v1/tags", json!({ "name": "spicy" }), &user_token).await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/tags/{id}");

    let forbidden = put_json_auth(app.clone(), &uri, json!({ "name": "hot" }), &user_token).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let renamed = put_json_auth(app.clone(), &uri, json!({ "name": " HOT " }), &admin_token).await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(body_json(renamed).await["data"]["name"], "hot");

    assert_eq!(
        delete_auth(app.clone(), &uri, &user_token).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        delete_auth(app.clone(), &uri, &admin_token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(app, &uri, &admin_token).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn renaming_onto_an_existing_tag_conflicts(pool: PgPool) {
    let (_, admin_token) = common::create_user_with_token(&pool, "admin", true).await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/tags", json!({ "name": "sweet" }), &admin_token).await;
    let created =
        post_json_auth(app.clone(), "/api/v1/tags", json!({ "name": "savory" }), &admin_token).await;
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/tags/{id}"),
        json!({ "name": "sweet" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
