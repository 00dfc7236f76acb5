//! Repository for recipe search and discovery.
//!
//! Runs the statements assembled by [`RecipeSearchQuery`], plus the
//! title-suggestion and popular-tag lookups.

use recipebox_core::recipe_query::{RecipeSearchQuery, SqlArg};
use recipebox_core::search::{
    clamp_limit, suggestion_pattern, SearchFilters, SearchPage, DEFAULT_POPULAR_TAG_LIMIT,
    DEFAULT_SUGGESTION_LIMIT, MAX_POPULAR_TAG_LIMIT, MAX_SUGGESTION_LIMIT,
};
use recipebox_core::types::Visibility;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgPool, Postgres};

use crate::models::recipe::Recipe;
use crate::models::search::SearchResult;
use crate::models::tag::PopularTag;

/// Provides search operations over the `recipes` and `tags` tables.
pub struct SearchRepo;

impl SearchRepo {
    /// Run a filtered, sorted, paginated recipe search.
    ///
    /// Issues the page query and then the count query. A failure in either
    /// fails the whole search; no partial page is returned.
    pub async fn search(pool: &PgPool, filters: &SearchFilters) -> Result<SearchResult, sqlx::Error> {
        let query = RecipeSearchQuery::build(filters);

        let select = query
            .select_args()
            .fold(sqlx::query_as::<_, Recipe>(&query.select_sql), bind_as);
        let recipes = select.fetch_all(pool).await?;

        let count = query
            .filter_args
            .iter()
            .fold(sqlx::query_scalar::<_, i64>(&query.count_sql), bind_scalar);
        let total_count = count.fetch_one(pool).await?;

        tracing::debug!(
            filter_args = query.filter_args.len(),
            returned = recipes.len(),
            total_count,
            "Recipe search executed",
        );

        Ok(SearchPage::new(recipes, total_count, query.offset, query.limit))
    }

    /// Distinct recipe titles starting with `prefix` (case-insensitive),
    /// shortest first, then alphabetical.
    ///
    /// Prefixes shorter than two characters return an empty list without
    /// touching the database. Only titles of recipes `visibility` permits
    /// are suggested.
    pub async fn suggestions(
        pool: &PgPool,
        prefix: &str,
        limit: Option<i64>,
        visibility: Visibility,
    ) -> Result<Vec<String>, sqlx::Error> {
        let Some(pattern) = suggestion_pattern(prefix) else {
            return Ok(Vec::new());
        };
        let limit = clamp_limit(limit, DEFAULT_SUGGESTION_LIMIT, MAX_SUGGESTION_LIMIT);

        sqlx::query_scalar::<_, String>(
            "SELECT title FROM ( \
                 SELECT DISTINCT r.title FROM recipes r \
                 WHERE LOWER(r.title) LIKE $1 ESCAPE '\\' \
                   AND (NOT $3 OR r.is_public OR r.user_id = $4) \
             ) matches \
             ORDER BY LENGTH(title), title \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(limit)
        .bind(visibility.is_restricted())
        .bind(visibility.owner_id())
        .fetch_all(pool)
        .await
    }

    /// Tags ordered by how many recipes use them, ties broken by name.
    ///
    /// Only recipes `visibility` permits are counted, and tags attached to
    /// no such recipe are not listed.
    pub async fn popular_tags(
        pool: &PgPool,
        limit: Option<i64>,
        visibility: Visibility,
    ) -> Result<Vec<PopularTag>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_POPULAR_TAG_LIMIT, MAX_POPULAR_TAG_LIMIT);

        sqlx::query_as::<_, PopularTag>(
            "SELECT t.id, t.name, t.color, t.created_at, COUNT(rt.recipe_id) AS recipe_count \
             FROM tags t \
             JOIN recipe_tags rt ON rt.tag_id = t.id \
             JOIN recipes r ON r.id = rt.recipe_id \
             WHERE (NOT $2 OR r.is_public OR r.user_id = $3) \
             GROUP BY t.id \
             ORDER BY recipe_count DESC, t.name ASC \
             LIMIT $1",
        )
        .bind(limit)
        .bind(visibility.is_restricted())
        .bind(visibility.owner_id())
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Argument binding
// ---------------------------------------------------------------------------

fn bind_as<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    arg: &'q SqlArg,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match arg {
        SqlArg::Text(v) => query.bind(v.as_str()),
        SqlArg::Int(v) => query.bind(*v),
        SqlArg::BigInt(v) => query.bind(*v),
        SqlArg::Bool(v) => query.bind(*v),
    }
}

fn bind_scalar<'q, O>(
    query: QueryScalar<'q, Postgres, O, PgArguments>,
    arg: &'q SqlArg,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    match arg {
        SqlArg::Text(v) => query.bind(v.as_str()),
        SqlArg::Int(v) => query.bind(*v),
        SqlArg::BigInt(v) => query.bind(*v),
        SqlArg::Bool(v) => query.bind(*v),
    }
}
