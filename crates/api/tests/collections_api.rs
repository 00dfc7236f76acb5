//! HTTP-level tests for `/collections` and recipe membership.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_recipe(app: &Router, token: &str, title: &str, public: bool) -> i64 {
    let body = json!({
        "title": title,
        "instructions": "Cook it slowly until it is ready.",
        "is_public": public,
    });
    let response = post_json_auth(app.clone(), "/api/v1/recipes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_collection(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/collections",
        json!({ "name": name, "description": "Things to cook" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn add(app: &Router, token: &str, collection: i64, recipe: i64) -> StatusCode {
    post_json_auth(
        app.clone(),
        &format!("/api/v1/collections/{collection}/recipes"),
        json!({ "recipe_id": recipe }),
        token,
    )
    .await
    .status()
}

fn titles(json: &Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collection_crud_is_owner_only(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner", false).await;
    let (_, other) = common::create_user_with_token(&pool, "other", false).await;
    let app = common::build_test_app(pool);

    assert_eq!(
        get(app.clone(), "/api/v1/collections").await.status(),
        StatusCode::UNAUTHORIZED
    );

    let short = post_json_auth(app.clone(), "/api/v1/collections", json!({ "name": "x" }), &owner)
        .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let id = create_collection(&app, &owner, "Sunday lunch").await;
    let uri = format!("/api/v1/collections/{id}");

    let listed = body_json(get_auth(app.clone(), "/api/v1/collections", &owner).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    let listed = body_json(get_auth(app.clone(), "/api/v1/collections", &other).await).await;
    assert_eq!(listed["data"], json!([]));

    assert_eq!(
        get_auth(app.clone(), &uri, &other).await.status(),
        StatusCode::NOT_FOUND
    );
    let renamed = put_json_auth(app.clone(), &uri, json!({ "name": "Roasts" }), &other).await;
    assert_eq!(renamed.status(), StatusCode::NOT_FOUND);

    let renamed = put_json_auth(app.clone(), &uri, json!({ "name": "Roasts" }), &owner).await;
    assert_eq!(renamed.status(), StatusCode::OK);
    let data = body_json(renamed).await["data"].clone();
    assert_eq!(data["name"], "Roasts");
    assert_eq!(data["description"], "Things to cook");

    assert_eq!(
        delete_auth(app.clone(), &uri, &other).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        delete_auth(app.clone(), &uri, &owner).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(get_auth(app, &uri, &owner).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipes_can_be_added_and_removed(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "cook", false).await;
    let app = common::build_test_app(pool);
    let collection = create_collection(&app, &token, "Favourites").await;
    let stew = create_recipe(&app, &token, "Irish stew", true).await;
    let tart = create_recipe(&app, &token, "Lemon tart", false).await;

    assert_eq!(add(&app, &token, collection, stew).await, StatusCode::NO_CONTENT);
    assert_eq!(add(&app, &token, collection, stew).await, StatusCode::NO_CONTENT);
    assert_eq!(add(&app, &token, collection, tart).await, StatusCode::NO_CONTENT);
    assert_eq!(add(&app, &token, collection, 99999).await, StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/collections/{collection}");
    let summary = body_json(get_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(summary["data"]["recipe_count"], 2);
    assert!(summary["data"].get("recipes").is_none());

    let detail = body_json(
        get_auth(app.clone(), &format!("{uri}?include_recipes=true"), &token).await,
    )
    .await;
    assert_eq!(titles(&detail["data"]["recipes"]), vec!["Lemon tart", "Irish stew"]);

    let holding = body_json(
        get_auth(app.clone(), &format!("/api/v1/recipes/{stew}/collections"), &token).await,
    )
    .await;
    assert_eq!(holding["data"][0]["id"], collection);

    let remove = format!("{uri}/recipes/{stew}");
    assert_eq!(
        delete_auth(app.clone(), &remove, &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(app.clone(), &remove, &token).await.status(),
        StatusCode::NO_CONTENT
    );

    let listed = body_json(get_auth(app, &format!("{uri}/recipes"), &token).await).await;
    assert_eq!(titles(&listed["data"]), vec!["Lemon tart"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn others_private_recipes_cannot_be_collected(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner", false).await;
    let (_, other) = common::create_user_with_token(&pool, "other", false).await;
    let app = common::build_test_app(pool);
    let secret = create_recipe(&app, &owner, "Secret sauce", false).await;
    let shared = create_recipe(&app, &owner, "Shared salad", true).await;
    let collection = create_collection(&app, &other, "Borrowed").await;

    assert_eq!(add(&app, &other, collection, secret).await, StatusCode::NOT_FOUND);
    assert_eq!(add(&app, &other, collection, shared).await, StatusCode::NO_CONTENT);

    // Adding to someone else's collection looks like a missing collection.
    let theirs = create_collection(&app, &owner, "Mine").await;
    assert_eq!(add(&app, &other, theirs, shared).await, StatusCode::NOT_FOUND);

    // Hiding a collected recipe removes it from other users' views.
    let hide = put_json_auth(
        app.clone(),
        &format!("/api/v1/recipes/{shared}"),
        json!({ "is_public": false }),
        &owner,
    )
    .await;
    assert_eq!(hide.status(), StatusCode::OK);

    let listed = body_json(
        get_auth(app, &format!("/api/v1/collections/{collection}/recipes"), &other).await,
    )
    .await;
    assert_eq!(listed["data"], json!([]));
}
