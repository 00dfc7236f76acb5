use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// GET /                 -> search_recipes
/// GET /suggestions      -> suggestions
/// GET /tags/popular     -> popular_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search_recipes))
        .route("/suggestions", get(search::suggestions))
        .route("/tags/popular", get(search::popular_tags))
}
