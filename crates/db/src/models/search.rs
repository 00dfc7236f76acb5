//! Search result types.

use recipebox_core::search::SearchPage;

use super::recipe::Recipe;

/// One page of recipe search results with pagination metadata.
pub type SearchResult = SearchPage<Recipe>;
