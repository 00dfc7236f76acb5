//! Tag models and DTOs.

use recipebox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// Tag info embedded in a recipe detail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A tag together with the number of recipes that reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PopularTag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub recipe_count: i64,
}

/// DTO for `POST /tags`. Creating an existing name returns that tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    /// `#RRGGBB`; defaults to gray.
    pub color: Option<String>,
}

/// DTO for `PUT /tags/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Query parameters for `GET /tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
