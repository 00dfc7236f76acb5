pub mod auth;
pub mod categories;
pub mod collections;
pub mod health;
pub mod ingredients;
pub mod recipe;
pub mod search;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/refresh                       new access token (requires auth)
/// /auth/me                            current user (requires auth)
///
/// /search                             search recipes (public)
/// /search/suggestions                 title suggestions (public)
/// /search/tags/popular                most-used tags (public)
///
/// /recipes                            list (public), create (auth)
/// /recipes/{id}                       get, update, delete
/// /recipes/{id}/tags                  replace tag set (PUT)
/// /recipes/{id}/ingredients           replace ingredient list (PUT)
/// /recipes/{id}/collections           caller's collections holding it (auth)
///
/// /tags                               list, create-or-get (auth)
/// /tags/{id}                          get (auth), update, delete (admin)
///
/// /categories                         list, create own categories (auth)
///
/// /ingredients                        list or search, create (auth)
/// /ingredients/{id}                   get (auth), update, delete (admin)
///
/// /collections                        list, create own collections (auth)
/// /collections/{id}                   get, update, delete (owner)
/// /collections/{id}/recipes           list, add (owner)
/// /collections/{id}/recipes/{rid}     remove (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/search", search::router())
        .nest("/recipes", recipe::router())
        .nest("/tags", tags::router())
        .nest("/categories", categories::router())
        .nest("/ingredients", ingredients::router())
        .nest("/collections", collections::router())
}
