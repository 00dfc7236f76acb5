//! Handlers for the caller's own recipe collections.
//!
//! Collections are private to their owner. Another user's collection answers
//! 404, never 403, so ids do not leak.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipebox_core::error::CoreError;
use recipebox_core::types::DbId;
use recipebox_db::models::collection::{
    AddCollectionRecipe, Collection, CollectionDetail, CollectionQuery, CreateCollection,
    UpdateCollection,
};
use recipebox_db::models::recipe::Recipe;
use recipebox_db::repositories::{CollectionRepo, RecipeRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/collections
pub async fn list_collections(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let collections = CollectionRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: collections }))
}

/// POST /api/v1/collections
pub async fn create_collection(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCollection>,
) -> AppResult<(StatusCode, Json<DataResponse<Collection>>)> {
    input.validate()?;

    let collection = CollectionRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(collection_id = collection.id, user_id = auth.user_id, "Collection created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: collection })))
}

/// GET /api/v1/collections/{id}?include_recipes=
pub async fn get_collection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
    Query(params): Query<CollectionQuery>,
) -> AppResult<Json<DataResponse<CollectionDetail>>> {
    let collection = load_owned(&state, &auth, collection_id).await?;
    let recipes = CollectionRepo::recipes(&state.pool, collection_id, auth.visibility()).await?;

    let detail = CollectionDetail {
        collection,
        recipe_count: recipes.len(),
        recipes: params.include_recipes.then_some(recipes),
    };
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/collections/{id}
pub async fn update_collection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
    Json(input): Json<UpdateCollection>,
) -> AppResult<Json<DataResponse<Collection>>> {
    input.validate()?;

    let collection = CollectionRepo::update(&state.pool, collection_id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(collection_id))?;

    tracing::info!(collection_id, user_id = auth.user_id, "Collection updated");

    Ok(Json(DataResponse { data: collection }))
}

/// DELETE /api/v1/collections/{id}
pub async fn delete_collection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CollectionRepo::delete(&state.pool, collection_id, auth.user_id).await? {
        return Err(not_found(collection_id));
    }

    tracing::info!(collection_id, user_id = auth.user_id, "Collection deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/collections/{id}/recipes
pub async fn list_collection_recipes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Recipe>>>> {
    load_owned(&state, &auth, collection_id).await?;
    let recipes = CollectionRepo::recipes(&state.pool, collection_id, auth.visibility()).await?;
    Ok(Json(DataResponse { data: recipes }))
}

/// POST /api/v1/collections/{id}/recipes
///
/// Adding a recipe that is already collected succeeds. The recipe must be
/// one the caller can see.
pub async fn add_collection_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(collection_id): Path<DbId>,
    Json(input): Json<AddCollectionRecipe>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, collection_id).await?;

    let recipe_id = input.recipe_id;
    let visible = RecipeRepo::find_by_id(&state.pool, recipe_id)
        .await?
        .is_some_and(|r| auth.visibility().permits(r.user_id, r.is_public));
    if !visible {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }));
    }

    let added = CollectionRepo::add_recipe(&state.pool, collection_id, recipe_id).await?;

    tracing::info!(collection_id, recipe_id, added, "Recipe collected");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/collections/{id}/recipes/{recipe_id}
///
/// Removing a recipe that is not in the collection succeeds.
pub async fn remove_collection_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((collection_id, recipe_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, collection_id).await?;

    let removed = CollectionRepo::remove_recipe(&state.pool, collection_id, recipe_id).await?;

    tracing::info!(collection_id, recipe_id, removed, "Recipe removed from collection");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Collection",
        id,
    })
}

async fn load_owned(state: &AppState, auth: &AuthUser, collection_id: DbId) -> AppResult<Collection> {
    CollectionRepo::find_for_user(&state.pool, collection_id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(collection_id))
}
