//! Repository for the `categories` and `recipe_categories` tables.

use recipebox_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::category::{Category, CreateCategory};

const COLUMNS: &str = "id, user_id, name, parent_id, created_at";

/// Provides operations for user-owned recipe categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, parent_id) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All categories owned by a user, alphabetically.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Categories a recipe is filed under, alphabetically.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT c.id, c.user_id, c.name, c.parent_id, c.created_at \
             FROM categories c \
             JOIN recipe_categories rc ON rc.category_id = c.id \
             WHERE rc.recipe_id = $1 \
             ORDER BY c.name",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }
}

/// Link a recipe to the given categories, skipping ids not owned by `user_id`.
pub(crate) async fn attach_owned(
    conn: &mut PgConnection,
    recipe_id: DbId,
    user_id: DbId,
    category_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    if category_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO recipe_categories (recipe_id, category_id) \
         SELECT $1, c.id FROM categories c \
         WHERE c.id = ANY($2) AND c.user_id = $3 \
         ON CONFLICT DO NOTHING",
    )
    .bind(recipe_id)
    .bind(category_ids)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
