//! Repository for the `recipes` table.

use recipebox_core::types::DbId;
use sqlx::PgPool;

use super::category_repo::{attach_owned, CategoryRepo};
use super::ingredient_repo::{self, IngredientRepo};
use super::tag_repo::{attach_by_name, TagRepo};
use crate::models::recipe::{CreateRecipe, Recipe, RecipeDetail, UpdateRecipe};

/// Column list shared across queries (everything but `search_vector`).
const COLUMNS: &str = "id, user_id, title, description, instructions, prep_time, cook_time, \
                       servings, difficulty, image_url, is_public, created_at, updated_at";

/// Provides CRUD operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe owned by `user_id`, with its ingredients, tags, and
    /// categories, in one transaction.
    ///
    /// `difficulty` is the validated lowercase level; tag names in `input`
    /// must already be normalized.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRecipe,
        difficulty: &str,
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes \
                 (user_id, title, description, instructions, prep_time, cook_time, \
                  servings, difficulty, image_url, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 1), $8, $9, COALESCE($10, true)) \
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.instructions)
            .bind(input.prep_time)
            .bind(input.cook_time)
            .bind(input.servings)
            .bind(difficulty)
            .bind(&input.image_url)
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        ingredient_repo::attach(&mut tx, recipe.id, &input.ingredients).await?;
        attach_by_name(&mut tx, recipe.id, &input.tags).await?;
        attach_owned(&mut tx, recipe.id, user_id, &input.category_ids).await?;

        tx.commit().await?;
        Ok(recipe)
    }

    /// Find a recipe by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recipe by ID together with its ingredients, tags, and categories.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<RecipeDetail>, sqlx::Error> {
        let Some(recipe) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let ingredients = IngredientRepo::list_for_recipe(pool, id).await?;
        let tags = TagRepo::list_for_recipe(pool, id).await?;
        let categories = CategoryRepo::list_for_recipe(pool, id).await?;
        Ok(Some(RecipeDetail {
            recipe,
            ingredients,
            tags,
            categories,
        }))
    }

    /// Update a recipe. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecipe,
        difficulty: Option<&str>,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                instructions = COALESCE($4, instructions),
                prep_time = COALESCE($5, prep_time),
                cook_time = COALESCE($6, cook_time),
                servings = COALESCE($7, servings),
                difficulty = COALESCE($8, difficulty),
                image_url = COALESCE($9, image_url),
                is_public = COALESCE($10, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.instructions)
            .bind(input.prep_time)
            .bind(input.cook_time)
            .bind(input.servings)
            .bind(difficulty)
            .bind(&input.image_url)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a recipe. Ingredient lines and tag, category, and collection
    /// links cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
