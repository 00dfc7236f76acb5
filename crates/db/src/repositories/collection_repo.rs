//! Repository for the `collections` and `recipe_collections` tables.
//!
//! Every collection lookup is scoped by owner: another user's collection is
//! indistinguishable from a missing one.

use recipebox_core::recipe_query::SEARCH_COLUMNS;
use recipebox_core::types::{DbId, Visibility};
use sqlx::PgPool;

use crate::models::collection::{Collection, CreateCollection, UpdateCollection};
use crate::models::recipe::Recipe;

const COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

/// Provides CRUD operations for user-owned recipe collections.
pub struct CollectionRepo;

impl CollectionRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (user_id, name, description) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a collection owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's collections, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a collection owned by `user_id`. Only non-`None` fields apply.
    ///
    /// Returns `None` if the user owns no collection with this ID.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a collection owned by `user_id`. The recipes are untouched.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Recipes in a collection, newest first, limited to what `visibility`
    /// permits. A recipe made private after being collected drops out.
    pub async fn recipes(
        pool: &PgPool,
        collection_id: DbId,
        visibility: Visibility,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {SEARCH_COLUMNS} FROM recipes r \
             JOIN recipe_collections rc ON rc.recipe_id = r.id \
             WHERE rc.collection_id = $1 \
               AND (NOT $2 OR r.is_public OR r.user_id = $3) \
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(collection_id)
            .bind(visibility.is_restricted())
            .bind(visibility.owner_id())
            .fetch_all(pool)
            .await
    }

    /// Add a recipe to a collection. Adding it twice is a no-op.
    ///
    /// Returns `true` if the recipe was newly added.
    pub async fn add_recipe(
        pool: &PgPool,
        collection_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO recipe_collections (collection_id, recipe_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(collection_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a recipe from a collection. Removing an absent recipe is a
    /// no-op.
    ///
    /// Returns `true` if a link was deleted.
    pub async fn remove_recipe(
        pool: &PgPool,
        collection_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM recipe_collections WHERE collection_id = $1 AND recipe_id = $2",
        )
        .bind(collection_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The collections owned by `user_id` that contain a recipe.
    pub async fn list_containing(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        sqlx::query_as::<_, Collection>(
            "SELECT c.id, c.user_id, c.name, c.description, c.created_at, c.updated_at \
             FROM collections c \
             JOIN recipe_collections rc ON rc.collection_id = c.id \
             WHERE c.user_id = $1 AND rc.recipe_id = $2 \
             ORDER BY c.name",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }
}
