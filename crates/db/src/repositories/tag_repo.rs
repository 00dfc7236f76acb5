//! Repository for the `tags` and `recipe_tags` tables.

use recipebox_core::tag::DEFAULT_TAG_COLOR;
use recipebox_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tag::{Tag, TagInfo, TagListParams};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, color, created_at";

/// Default page size for tag listing.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for tag listing.
const MAX_LIMIT: i64 = 500;

/// Provides CRUD operations for tags and recipe-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Create a tag or return the existing one with the same name.
    ///
    /// `name` must already be normalized. An existing tag keeps its color.
    pub async fn create_or_get(
        pool: &PgPool,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        upsert(&mut conn, name, color.unwrap_or(DEFAULT_TAG_COLOR)).await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tags alphabetically, paginated.
    pub async fn list(pool: &PgPool, params: &TagListParams) -> Result<Vec<Tag>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Tag>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Rename and/or recolor a tag. `name` must already be normalized.
    ///
    /// Returns `None` if no tag with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET \
                 name = COALESCE($2, name), \
                 color = COALESCE($3, color) \
             WHERE id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(name)
            .bind(color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag by ID. Cascade deletes its recipe associations.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Recipe-tag associations
    // -----------------------------------------------------------------------

    /// Tags attached to a recipe, alphabetically.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<TagInfo>, sqlx::Error> {
        sqlx::query_as::<_, TagInfo>(
            "SELECT t.id, t.name, t.color \
             FROM tags t \
             JOIN recipe_tags rt ON rt.tag_id = t.id \
             WHERE rt.recipe_id = $1 \
             ORDER BY t.name",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a recipe's tags with `names` in one transaction.
    ///
    /// Unknown names are created with the default color. Names must already
    /// be normalized.
    pub async fn replace_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
        names: &[String],
    ) -> Result<Vec<TagInfo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        attach_by_name(&mut tx, recipe_id, names).await?;

        tx.commit().await?;

        Self::list_for_recipe(pool, recipe_id).await
    }
}

/// Insert-or-fetch a tag by normalized name on an existing connection.
async fn upsert(conn: &mut PgConnection, name: &str, color: &str) -> Result<Tag, sqlx::Error> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let query = format!(
        "INSERT INTO tags (name, color) VALUES ($1, $2) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING {TAG_COLUMNS}"
    );
    sqlx::query_as::<_, Tag>(&query)
        .bind(name)
        .bind(color)
        .fetch_one(&mut *conn)
        .await
}

/// Attach tags (creating unknown ones) to a recipe on an existing connection.
///
/// Used inside the recipe-create and tag-replace transactions.
pub(crate) async fn attach_by_name(
    conn: &mut PgConnection,
    recipe_id: DbId,
    names: &[String],
) -> Result<(), sqlx::Error> {
    for name in names {
        let tag = upsert(conn, name, DEFAULT_TAG_COLOR).await?;
        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(tag.id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
