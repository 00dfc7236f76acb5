//! Recipe search filters, query-string parsing, and pagination math.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future CLI tooling. The SQL assembled
//! from a [`SearchFilters`] value lives in [`crate::recipe_query`].

use serde::{Deserialize, Serialize};

use crate::recipe::Difficulty;
use crate::tag::normalize_tag_name;
use crate::types::{DbId, Visibility};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of search results per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Default number of title suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: i64 = 10;

/// Maximum number of title suggestions.
pub const MAX_SUGGESTION_LIMIT: i64 = 25;

/// Default number of popular tags.
pub const DEFAULT_POPULAR_TAG_LIMIT: i64 = 20;

/// Maximum number of popular tags.
pub const MAX_POPULAR_TAG_LIMIT: i64 = 100;

/// Shortest prefix (in characters) that triggers a suggestion lookup.
pub const MIN_SUGGESTION_PREFIX_CHARS: usize = 2;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Column a search result page is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Full-text rank. Only meaningful when a text query is present.
    Relevance,
    CreatedAt,
    Title,
    PrepTime,
    CookTime,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(SortField::Relevance),
            "created_at" => Some(SortField::CreatedAt),
            "title" => Some(SortField::Title),
            "prep_time" => Some(SortField::PrepTime),
            "cook_time" => Some(SortField::CookTime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Structured recipe search request.
///
/// Every field is optional; an absent field places no constraint on the
/// result. Values are assumed already validated: out-of-range input is
/// dropped while parsing [`SearchParams`], never carried here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub user_id: Option<DbId>,
    pub difficulty: Option<Difficulty>,
    /// Normalized tag names, matched with OR semantics.
    pub tags: Vec<String>,
    /// Category ids, matched with OR semantics.
    pub categories: Vec<DbId>,
    pub min_prep_time: Option<i32>,
    pub max_prep_time: Option<i32>,
    pub min_cook_time: Option<i32>,
    pub max_cook_time: Option<i32>,
    pub min_servings: Option<i32>,
    pub max_servings: Option<i32>,
    pub is_public: Option<bool>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortDirection>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Set from the caller's identity, never from the query string.
    pub visibility: Visibility,
}

impl SearchFilters {
    /// The free-text query, trimmed, or `None` when blank.
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Effective page size after defaults and bounds.
    pub fn page_size(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)
    }

    /// Effective row offset.
    pub fn page_offset(&self) -> i64 {
        clamp_offset(self.offset)
    }
}

/// Raw search query-string parameters.
///
/// Every field is kept as text so that a malformed value degrades to
/// "absent" in [`SearchParams::into_filters`] instead of failing
/// deserialization for the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub user_id: Option<String>,
    pub difficulty: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    /// Comma-separated category ids.
    pub categories: Option<String>,
    pub min_prep_time: Option<String>,
    pub max_prep_time: Option<String>,
    pub min_cook_time: Option<String>,
    pub max_cook_time: Option<String>,
    pub min_servings: Option<String>,
    pub max_servings: Option<String>,
    pub is_public: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchParams {
    pub fn into_filters(self) -> SearchFilters {
        SearchFilters {
            query: self
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            user_id: self.user_id.as_deref().and_then(parse_id),
            difficulty: self.difficulty.as_deref().and_then(Difficulty::parse),
            tags: self.tags.as_deref().map(parse_tag_list).unwrap_or_default(),
            categories: self
                .categories
                .as_deref()
                .map(parse_id_list)
                .unwrap_or_default(),
            min_prep_time: self.min_prep_time.as_deref().and_then(parse_bound),
            max_prep_time: self.max_prep_time.as_deref().and_then(parse_bound),
            min_cook_time: self.min_cook_time.as_deref().and_then(parse_bound),
            max_cook_time: self.max_cook_time.as_deref().and_then(parse_bound),
            min_servings: self.min_servings.as_deref().and_then(parse_bound),
            max_servings: self.max_servings.as_deref().and_then(parse_bound),
            is_public: self.is_public.as_deref().and_then(parse_bool),
            sort_by: self.sort_by.as_deref().and_then(SortField::parse),
            sort_order: self.sort_order.as_deref().and_then(SortDirection::parse),
            limit: self
                .limit
                .as_deref()
                .and_then(|v| parse_limit(v, MAX_SEARCH_LIMIT)),
            offset: self.offset.as_deref().and_then(parse_offset),
            visibility: Visibility::All,
        }
    }
}

/// Query parameters for `GET /search/suggestions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for `GET /search/tags/popular`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularTagParams {
    pub limit: Option<String>,
}

// ---------------------------------------------------------------------------
// Lenient parsers (malformed -> None)
// ---------------------------------------------------------------------------

fn parse_id(value: &str) -> Option<DbId> {
    value.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}

/// Non-negative minutes / servings bound.
fn parse_bound(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|v| *v >= 0)
}

/// Page size within `1..=max`.
pub fn parse_limit(value: &str, max: i64) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|v| (1..=max).contains(v))
}

fn parse_offset(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|v| *v >= 0)
}

/// Accepts the usual spellings: `1/0`, `t/f`, `true/false` in any case.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated tag list, normalizing and de-duplicating names.
fn parse_tag_list(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for name in value.split(',').map(normalize_tag_name) {
        if !name.is_empty() && !tags.contains(&name) {
            tags.push(name);
        }
    }
    tags
}

/// Split a comma-separated id list, dropping anything that is not a positive id.
fn parse_id_list(value: &str) -> Vec<DbId> {
    let mut ids: Vec<DbId> = Vec::new();
    for id in value.split(',').filter_map(parse_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Escape `LIKE` wildcards so user input matches literally (`ESCAPE '\'`).
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the lowercase `LIKE` pattern for a title prefix.
///
/// Returns `None` when the trimmed prefix is shorter than
/// [`MIN_SUGGESTION_PREFIX_CHARS`]; callers must skip the lookup entirely.
pub fn suggestion_pattern(prefix: &str) -> Option<String> {
    let prefix = prefix.trim();
    if prefix.chars().count() < MIN_SUGGESTION_PREFIX_CHARS {
        return None;
    }
    Some(format!("{}%", escape_like(&prefix.to_lowercase())))
}

// ---------------------------------------------------------------------------
// Result page
// ---------------------------------------------------------------------------

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage<T> {
    pub recipes: Vec<T>,
    /// Rows matching the filters, ignoring pagination.
    pub total_count: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> SearchPage<T> {
    pub fn new(recipes: Vec<T>, total_count: i64, offset: i64, page_size: i64) -> Self {
        let current_page = current_page(offset, page_size);
        Self {
            recipes,
            total_count,
            current_page,
            page_size,
            has_next: current_page.saturating_mul(page_size) < total_count,
            has_prev: current_page > 1,
        }
    }
}

/// 1-based page containing `offset`. Saturates at `i64::MAX`.
pub fn current_page(offset: i64, page_size: i64) -> i64 {
    if page_size > 0 {
        (offset / page_size).saturating_add(1)
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
