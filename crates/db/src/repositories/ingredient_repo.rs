//! Repository for the `ingredients` and `recipe_ingredients` tables.

use recipebox_core::search::escape_like;
use recipebox_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::ingredient::{
    CreateIngredient, Ingredient, RecipeIngredient, RecipeIngredientInput, UpdateIngredient,
};

const COLUMNS: &str = "id, name, category, created_at";

/// Maximum rows returned by a name search.
const SEARCH_LIMIT: i64 = 10;

/// Provides CRUD operations for ingredients and recipe ingredient lists.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert an ingredient. A duplicate name violates `uq_ingredients_name`.
    pub async fn create(pool: &PgPool, input: &CreateIngredient) -> Result<Ingredient, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (name, category) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(input.name.trim())
            .bind(input.category.as_deref().map(str::trim))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All ingredients, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients ORDER BY name");
        sqlx::query_as::<_, Ingredient>(&query).fetch_all(pool).await
    }

    /// Up to ten ingredients whose name contains `term`, case-insensitively.
    ///
    /// LIKE wildcards in `term` match literally.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Ingredient>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term.trim()));
        let query = format!(
            "SELECT {COLUMNS} FROM ingredients \
             WHERE name ILIKE $1 ESCAPE '\\' \
             ORDER BY name \
             LIMIT $2"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(pattern)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update an ingredient. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no ingredient with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIngredient,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!(
            "UPDATE ingredients SET \
                 name = COALESCE($2, name), \
                 category = COALESCE($3, category) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.category.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete an ingredient. It disappears from every recipe using it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Recipe ingredient lists
    // -----------------------------------------------------------------------

    /// A recipe's ingredient lines in the order they were given.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeIngredient>, sqlx::Error> {
        sqlx::query_as::<_, RecipeIngredient>(
            "SELECT ri.id, ri.ingredient_id, i.name, i.category, ri.quantity, ri.unit, ri.notes \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id = $1 \
             ORDER BY ri.id",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a recipe's ingredient lines in one transaction.
    ///
    /// An unknown `ingredient_id` violates `fk_recipe_ingredients_ingredient`
    /// and leaves the previous list in place.
    pub async fn replace_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
        lines: &[RecipeIngredientInput],
    ) -> Result<Vec<RecipeIngredient>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        attach(&mut tx, recipe_id, lines).await?;

        tx.commit().await?;

        Self::list_for_recipe(pool, recipe_id).await
    }
}

/// Insert ingredient lines for a recipe on an existing connection.
///
/// Used inside the recipe-create and ingredient-replace transactions.
pub(crate) async fn attach(
    conn: &mut PgConnection,
    recipe_id: DbId,
    lines: &[RecipeIngredientInput],
) -> Result<(), sqlx::Error> {
    for line in lines {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit, notes) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(recipe_id)
        .bind(line.ingredient_id)
        .bind(line.quantity)
        .bind(line.unit.as_deref())
        .bind(line.notes.as_deref())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
