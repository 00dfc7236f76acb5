//! Handlers for the shared `/ingredients` catalogue.
//!
//! Any signed-in user can list, search, read, and add ingredients; renaming
//! and deleting are admin-only because every recipe shares the catalogue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipebox_core::error::CoreError;
use recipebox_core::types::DbId;
use recipebox_db::models::ingredient::{
    CreateIngredient, Ingredient, IngredientListParams, UpdateIngredient,
};
use recipebox_db::repositories::IngredientRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/ingredients?search=
///
/// Without `search`, every ingredient alphabetically; with it, the first ten
/// names containing the term.
pub async fn list_ingredients(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IngredientListParams>,
) -> AppResult<Json<DataResponse<Vec<Ingredient>>>> {
    let ingredients = match params.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => IngredientRepo::search(&state.pool, term).await?,
        _ => IngredientRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: ingredients }))
}

/// POST /api/v1/ingredients
///
/// A name already in the catalogue is a 409.
pub async fn create_ingredient(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIngredient>,
) -> AppResult<(StatusCode, Json<DataResponse<Ingredient>>)> {
    input.validate()?;

    let ingredient = IngredientRepo::create(&state.pool, &input).await?;

    tracing::info!(ingredient_id = ingredient.id, user_id = auth.user_id, "Ingredient created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ingredient })))
}

/// GET /api/v1/ingredients/{id}
pub async fn get_ingredient(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(ingredient_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ingredient>>> {
    let ingredient = IngredientRepo::find_by_id(&state.pool, ingredient_id)
        .await?
        .ok_or_else(|| not_found(ingredient_id))?;
    Ok(Json(DataResponse { data: ingredient }))
}

/// PUT /api/v1/ingredients/{id}
pub async fn update_ingredient(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(ingredient_id): Path<DbId>,
    Json(input): Json<UpdateIngredient>,
) -> AppResult<Json<DataResponse<Ingredient>>> {
    input.validate()?;

    let ingredient = IngredientRepo::update(&state.pool, ingredient_id, &input)
        .await?
        .ok_or_else(|| not_found(ingredient_id))?;

    tracing::info!(ingredient_id, user_id = admin.user_id, "Ingredient updated");

    Ok(Json(DataResponse { data: ingredient }))
}

/// DELETE /api/v1/ingredients/{id}
///
/// Also removes the ingredient from every recipe that lists it.
pub async fn delete_ingredient(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(ingredient_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !IngredientRepo::delete(&state.pool, ingredient_id).await? {
        return Err(not_found(ingredient_id));
    }

    tracing::info!(ingredient_id, user_id = admin.user_id, "Ingredient deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ingredient",
        id,
    })
}
