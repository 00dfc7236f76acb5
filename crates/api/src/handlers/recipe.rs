//! Handlers for the `/recipes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipebox_core::error::CoreError;
use recipebox_core::recipe::{parse_difficulty, validate_image_url, Difficulty};
use recipebox_core::search::SearchParams;
use recipebox_core::tag::normalize_tag_names;
use recipebox_core::types::DbId;
use recipebox_db::models::collection::Collection;
use recipebox_db::models::ingredient::{
    repeated_ingredient, RecipeIngredient, RecipeIngredientInput, SetRecipeIngredients,
};
use recipebox_db::models::recipe::{
    CreateRecipe, Recipe, RecipeDetail, SetRecipeTags, UpdateRecipe,
};
use recipebox_db::models::search::SearchResult;
use recipebox_db::models::tag::TagInfo;
use recipebox_db::repositories::{CollectionRepo, IngredientRepo, RecipeRepo, TagRepo};
use validator::Validate;

use super::search::run_search;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/recipes
///
/// Same query parameters and response shape as `GET /search`.
pub async fn list_recipes(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<SearchResult>>> {
    run_search(viewer, &state, params).await
}

/// POST /api/v1/recipes
pub async fn create_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRecipe>,
) -> AppResult<(StatusCode, Json<DataResponse<RecipeDetail>>)> {
    input.validate()?;
    validate_image_url(input.image_url.as_deref())?;
    let difficulty = match input.difficulty.as_deref() {
        Some(d) => parse_difficulty(d)?,
        None => Difficulty::Medium,
    };
    input.tags = normalize_tag_names(&input.tags)?;
    ensure_distinct_ingredients(&input.ingredients)?;

    let recipe = RecipeRepo::create(&state.pool, auth.user_id, &input, difficulty.as_str()).await?;
    tracing::info!(recipe_id = recipe.id, user_id = auth.user_id, "Recipe created");

    let detail = load_detail(&state, recipe.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/recipes/{id}
///
/// Private recipes are visible only to their owner and admins; everyone else
/// gets 404.
pub async fn get_recipe(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecipeDetail>>> {
    let detail = load_detail(&state, recipe_id).await?;

    if !viewer
        .visibility()
        .permits(detail.recipe.user_id, detail.recipe.is_public)
    {
        return Err(not_found(recipe_id));
    }

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/recipes/{id}
pub async fn update_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(input): Json<UpdateRecipe>,
) -> AppResult<Json<DataResponse<Recipe>>> {
    ensure_can_manage(&state, &auth, recipe_id).await?;

    input.validate()?;
    validate_image_url(input.image_url.as_deref())?;
    let difficulty = input
        .difficulty
        .as_deref()
        .map(parse_difficulty)
        .transpose()?;

    let recipe = RecipeRepo::update(
        &state.pool,
        recipe_id,
        &input,
        difficulty.map(Difficulty::as_str),
    )
    .await?
    .ok_or_else(|| not_found(recipe_id))?;

    tracing::info!(recipe_id, user_id = auth.user_id, "Recipe updated");

    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /api/v1/recipes/{id}
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_can_manage(&state, &auth, recipe_id).await?;

    if !RecipeRepo::delete(&state.pool, recipe_id).await? {
        return Err(not_found(recipe_id));
    }

    tracing::info!(recipe_id, user_id = auth.user_id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/recipes/{id}/tags
///
/// Replace the recipe's tag set. Unknown tags are created.
pub async fn set_recipe_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(input): Json<SetRecipeTags>,
) -> AppResult<Json<DataResponse<Vec<TagInfo>>>> {
    ensure_can_manage(&state, &auth, recipe_id).await?;

    let names = normalize_tag_names(&input.tags)?;
    let tags = TagRepo::replace_for_recipe(&state.pool, recipe_id, &names).await?;

    tracing::info!(recipe_id, tag_count = tags.len(), "Recipe tags replaced");

    Ok(Json(DataResponse { data: tags }))
}

/// PUT /api/v1/recipes/{id}/ingredients
///
/// Replace the recipe's ingredient list. Every `ingredient_id` must exist.
pub async fn set_recipe_ingredients(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(input): Json<SetRecipeIngredients>,
) -> AppResult<Json<DataResponse<Vec<RecipeIngredient>>>> {
    ensure_can_manage(&state, &auth, recipe_id).await?;

    input.validate()?;
    ensure_distinct_ingredients(&input.ingredients)?;

    let ingredients =
        IngredientRepo::replace_for_recipe(&state.pool, recipe_id, &input.ingredients).await?;

    tracing::info!(
        recipe_id,
        ingredient_count = ingredients.len(),
        "Recipe ingredients replaced"
    );

    Ok(Json(DataResponse { data: ingredients }))
}

/// GET /api/v1/recipes/{id}/collections
///
/// The caller's collections that contain this recipe.
pub async fn list_recipe_collections(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let collections = CollectionRepo::list_containing(&state.pool, auth.user_id, recipe_id).await?;
    Ok(Json(DataResponse { data: collections }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id,
    })
}

fn ensure_distinct_ingredients(lines: &[RecipeIngredientInput]) -> AppResult<()> {
    match repeated_ingredient(lines) {
        Some(id) => Err(AppError::BadRequest(format!(
            "Ingredient {id} is listed more than once"
        ))),
        None => Ok(()),
    }
}

async fn load_detail(state: &AppState, recipe_id: DbId) -> AppResult<RecipeDetail> {
    RecipeRepo::find_detail(&state.pool, recipe_id)
        .await?
        .ok_or_else(|| not_found(recipe_id))
}

/// 404 if the recipe is missing, 403 unless the caller owns it or is an admin.
async fn ensure_can_manage(state: &AppState, auth: &AuthUser, recipe_id: DbId) -> AppResult<()> {
    let recipe = RecipeRepo::find_by_id(&state.pool, recipe_id)
        .await?
        .ok_or_else(|| not_found(recipe_id))?;

    if !auth.can_manage(recipe.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the recipe owner or an admin may modify it".into(),
        )));
    }
    Ok(())
}
