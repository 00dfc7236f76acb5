use axum::routing::get;
use axum::Router;

use crate::handlers::ingredients;
use crate::state::AppState;

/// Routes mounted at `/ingredients`.
///
/// ```text
/// GET    /        -> list_ingredients (?search=)
/// POST   /        -> create_ingredient
/// GET    /{id}    -> get_ingredient
/// PUT    /{id}    -> update_ingredient (admin only)
/// DELETE /{id}    -> delete_ingredient (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/{id}",
            get(ingredients::get_ingredient)
                .put(ingredients::update_ingredient)
                .delete(ingredients::delete_ingredient),
        )
}
