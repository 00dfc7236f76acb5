//! Handlers for recipe search and discovery.
//!
//! All three endpoints are public. Malformed query parameters are treated as
//! absent rather than rejected. Anonymous callers only see public recipes;
//! signed-in users also see their own private ones, admins see all.

use axum::extract::{Query, State};
use axum::Json;
use recipebox_core::search::{
    parse_limit, PopularTagParams, SearchFilters, SearchParams, SuggestionParams,
    MAX_POPULAR_TAG_LIMIT, MAX_SUGGESTION_LIMIT,
};
use recipebox_db::models::search::SearchResult;
use recipebox_db::models::tag::PopularTag;
use recipebox_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::middleware::auth::OptionalAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search
pub async fn search_recipes(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<SearchResult>>> {
    run_search(viewer, &state, params).await
}

/// GET /api/v1/search/suggestions?q=&limit=
pub async fn suggestions(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let prefix = params.q.unwrap_or_default();
    let limit = params
        .limit
        .as_deref()
        .and_then(|v| parse_limit(v, MAX_SUGGESTION_LIMIT));

    let titles =
        SearchRepo::suggestions(&state.pool, &prefix, limit, viewer.visibility()).await?;

    Ok(Json(DataResponse { data: titles }))
}

/// GET /api/v1/search/tags/popular?limit=
pub async fn popular_tags(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<PopularTagParams>,
) -> AppResult<Json<DataResponse<Vec<PopularTag>>>> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|v| parse_limit(v, MAX_POPULAR_TAG_LIMIT));

    let tags = SearchRepo::popular_tags(&state.pool, limit, viewer.visibility()).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// Parse, search, and log. Shared with `GET /recipes`.
pub(crate) async fn run_search(
    viewer: OptionalAuthUser,
    state: &AppState,
    params: SearchParams,
) -> AppResult<Json<DataResponse<SearchResult>>> {
    let filters = SearchFilters {
        visibility: viewer.visibility(),
        ..params.into_filters()
    };
    let result = SearchRepo::search(&state.pool, &filters).await?;

    tracing::debug!(
        viewer_id = ?viewer.user_id(),
        has_text = filters.text_query().is_some(),
        tags = filters.tags.len(),
        total_count = result.total_count,
        page = result.current_page,
        "Recipe search",
    );

    Ok(Json(DataResponse { data: result }))
}
