use axum::routing::{get, put};
use axum::Router;

use crate::handlers::recipe;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET    /            -> list_recipes
/// POST   /            -> create_recipe
/// GET    /{id}        -> get_recipe
/// PUT    /{id}        -> update_recipe
/// DELETE /{id}        -> delete_recipe
/// PUT    /{id}/tags          -> set_recipe_tags
/// PUT    /{id}/ingredients   -> set_recipe_ingredients
/// GET    /{id}/collections   -> list_recipe_collections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipe::list_recipes).post(recipe::create_recipe))
        .route(
            "/{id}",
            get(recipe::get_recipe)
                .put(recipe::update_recipe)
                .delete(recipe::delete_recipe),
        )
        .route("/{id}/tags", put(recipe::set_recipe_tags))
        .route("/{id}/ingredients", put(recipe::set_recipe_ingredients))
        .route("/{id}/collections", get(recipe::list_recipe_collections))
}
