use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::collections;
use crate::state::AppState;

/// Routes mounted at `/collections`. All require auth.
///
/// ```text
/// GET    /                          -> list_collections
/// POST   /                          -> create_collection
/// GET    /{id}                      -> get_collection (?include_recipes=true)
/// PUT    /{id}                      -> update_collection
/// DELETE /{id}                      -> delete_collection
/// GET    /{id}/recipes              -> list_collection_recipes
/// POST   /{id}/recipes              -> add_collection_recipe
/// DELETE /{id}/recipes/{recipe_id}  -> remove_collection_recipe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collections::list_collections).post(collections::create_collection),
        )
        .route(
            "/{id}",
            get(collections::get_collection)
                .put(collections::update_collection)
                .delete(collections::delete_collection),
        )
        .route(
            "/{id}/recipes",
            get(collections::list_collection_recipes).post(collections::add_collection_recipe),
        )
        .route(
            "/{id}/recipes/{recipe_id}",
            delete(collections::remove_collection_recipe),
        )
}
