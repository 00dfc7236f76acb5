//! SQL assembly for recipe search.
//!
//! [`RecipeSearchQuery::build`] turns a [`SearchFilters`] value into a page
//! query and a count query that share the same `WHERE` clause and the same
//! placeholder numbering. Filter arguments and pagination arguments are
//! collected into separate lists while the clause is built, so the count
//! query binds exactly the filter arguments and nothing else.

use crate::search::{SearchFilters, SortDirection, SortField};
use crate::types::Visibility;

/// Columns selected for a search result row (table alias `r`).
pub const SEARCH_COLUMNS: &str = "\
    r.id, r.user_id, r.title, r.description, r.instructions, \
    r.prep_time, r.cook_time, r.servings, r.difficulty, \
    r.image_url, r.is_public, r.created_at, r.updated_at";

/// Text-search configuration used for both matching and ranking.
const TS_CONFIG: &str = "english";

/// A positional argument destined for a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i32),
    BigInt(i64),
    Bool(bool),
}

/// The fully assembled search statements and their arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSearchQuery {
    /// Page query: filters, ordering, `LIMIT`/`OFFSET`.
    pub select_sql: String,
    /// Count query: filters only.
    pub count_sql: String,
    /// Arguments for the filter placeholders, `$1..=$n`.
    pub filter_args: Vec<SqlArg>,
    /// Arguments for `LIMIT $n+1 OFFSET $n+2`.
    pub page_args: Vec<SqlArg>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

impl RecipeSearchQuery {
    pub fn build(filters: &SearchFilters) -> Self {
        let mut clause = WhereClause::default();

        let text_placeholder = filters.text_query().map(|q| {
            let p = clause.bind(SqlArg::Text(q.to_string()));
            clause.push(format!(
                "r.search_vector @@ plainto_tsquery('{TS_CONFIG}', {p})"
            ));
            p
        });

        if let Some(user_id) = filters.user_id {
            let p = clause.bind(SqlArg::BigInt(user_id));
            clause.push(format!("r.user_id = {p}"));
        }

        if let Some(difficulty) = filters.difficulty {
            let p = clause.bind(SqlArg::Text(difficulty.as_str().to_string()));
            clause.push(format!("r.difficulty = {p}"));
        }

        if !filters.tags.is_empty() {
            let list = clause.bind_list(filters.tags.iter().cloned().map(SqlArg::Text));
            clause.push(format!(
                "EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
                 WHERE rt.recipe_id = r.id AND t.name IN ({list}))"
            ));
        }

        if !filters.categories.is_empty() {
            let list = clause.bind_list(filters.categories.iter().copied().map(SqlArg::BigInt));
            clause.push(format!(
                "EXISTS (SELECT 1 FROM recipe_categories rc \
                 WHERE rc.recipe_id = r.id AND rc.category_id IN ({list}))"
            ));
        }

        clause.push_nullable_bound("r.prep_time", ">=", filters.min_prep_time);
        clause.push_nullable_bound("r.prep_time", "<=", filters.max_prep_time);
        clause.push_nullable_bound("r.cook_time", ">=", filters.min_cook_time);
        clause.push_nullable_bound("r.cook_time", "<=", filters.max_cook_time);
        clause.push_bound("r.servings", ">=", filters.min_servings);
        clause.push_bound("r.servings", "<=", filters.max_servings);

        if let Some(is_public) = filters.is_public {
            let p = clause.bind(SqlArg::Bool(is_public));
            clause.push(format!("r.is_public = {p}"));
        }

        match filters.visibility {
            Visibility::All => {}
            Visibility::PublicOnly => clause.push("r.is_public = TRUE".to_string()),
            Visibility::PublicOrOwnedBy(owner) => {
                let p = clause.bind(SqlArg::BigInt(owner));
                clause.push(format!("(r.is_public = TRUE OR r.user_id = {p})"));
            }
        }

        let (sort_field, sort_direction) = resolve_sort(filters);
        let order_by = order_by_sql(sort_field, sort_direction, text_placeholder.as_deref());

        let limit = filters.page_size();
        let offset = filters.page_offset();
        let limit_idx = clause.next_index;
        let offset_idx = limit_idx + 1;

        let where_sql = clause.where_sql();
        let select_sql = format!(
            "SELECT {SEARCH_COLUMNS} FROM recipes r{where_sql} \
             ORDER BY {order_by} LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );
        let count_sql = format!("SELECT COUNT(*) FROM recipes r{where_sql}");

        Self {
            select_sql,
            count_sql,
            filter_args: clause.args,
            page_args: vec![SqlArg::BigInt(limit), SqlArg::BigInt(offset)],
            sort_field,
            sort_direction,
            limit,
            offset,
        }
    }

    /// Arguments for [`Self::select_sql`], in placeholder order.
    pub fn select_args(&self) -> impl Iterator<Item = &SqlArg> {
        self.filter_args.iter().chain(self.page_args.iter())
    }
}

/// Accumulates `AND`-joined predicates and their positional arguments.
#[derive(Debug)]
struct WhereClause {
    predicates: Vec<String>,
    args: Vec<SqlArg>,
    /// Index of the next placeholder to hand out (1-based).
    next_index: usize,
}

impl Default for WhereClause {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
            args: Vec::new(),
            next_index: 1,
        }
    }
}

impl WhereClause {
    /// Record an argument and return its `$n` placeholder.
    fn bind(&mut self, arg: SqlArg) -> String {
        let placeholder = format!("${}", self.next_index);
        self.args.push(arg);
        self.next_index += 1;
        placeholder
    }

    /// Bind each argument and return the comma-joined placeholders.
    fn bind_list(&mut self, args: impl Iterator<Item = SqlArg>) -> String {
        args.map(|arg| self.bind(arg)).collect::<Vec<_>>().join(", ")
    }

    fn push(&mut self, predicate: String) {
        self.predicates.push(predicate);
    }

    /// `column op $n`, skipped when `value` is absent.
    fn push_bound(&mut self, column: &str, op: &str, value: Option<i32>) {
        if let Some(v) = value {
            let p = self.bind(SqlArg::Int(v));
            self.push(format!("{column} {op} {p}"));
        }
    }

    /// Like [`Self::push_bound`], but a NULL column also satisfies the bound.
    fn push_nullable_bound(&mut self, column: &str, op: &str, value: Option<i32>) {
        if let Some(v) = value {
            let p = self.bind(SqlArg::Int(v));
            self.push(format!("({column} {op} {p} OR {column} IS NULL)"));
        }
    }

    fn where_sql(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }
}

/// Pick the effective sort.
///
/// With a text query the default is relevance; without one, relevance has
/// nothing to rank by and falls back to `created_at`. Direction defaults to
/// descending.
pub fn resolve_sort(filters: &SearchFilters) -> (SortField, SortDirection) {
    let direction = filters.sort_order.unwrap_or_default();
    let field = match (filters.text_query(), filters.sort_by) {
        (Some(_), None) => SortField::Relevance,
        (None, None) | (None, Some(SortField::Relevance)) => SortField::CreatedAt,
        (_, Some(field)) => field,
    };
    (field, direction)
}

/// Build the `ORDER BY` body. Newest-first tie-breakers keep pages stable.
///
/// Relevance always ranks best-first; `text_placeholder` must be the
/// placeholder already bound to the text query.
fn order_by_sql(
    field: SortField,
    direction: SortDirection,
    text_placeholder: Option<&str>,
) -> String {
    const TIE_BREAK: &str = "r.created_at DESC, r.id DESC";
    let dir = direction.as_sql();

    match (field, text_placeholder) {
        (SortField::Relevance, Some(p)) => format!(
            "ts_rank(r.search_vector, plainto_tsquery('{TS_CONFIG}', {p})) DESC, {TIE_BREAK}"
        ),
        (SortField::Relevance, None) | (SortField::CreatedAt, _) => {
            format!("r.created_at {dir}, r.id {dir}")
        }
        (SortField::Title, _) => format!("r.title {dir}, {TIE_BREAK}"),
        (SortField::PrepTime, _) => format!("COALESCE(r.prep_time, 0) {dir}, {TIE_BREAK}"),
        (SortField::CookTime, _) => format!("COALESCE(r.cook_time, 0) {dir}, {TIE_BREAK}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
