//! Primitive types shared across the workspace.

use serde::Serialize;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Which recipes a caller is allowed to see.
///
/// Anonymous callers see public recipes, signed-in users additionally see
/// their own private ones, and admins see everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// No restriction. Admins and internal callers.
    #[default]
    All,
    /// Public recipes plus those owned by the given user.
    PublicOrOwnedBy(DbId),
    PublicOnly,
}

impl Visibility {
    pub fn for_viewer(user_id: Option<DbId>, is_admin: bool) -> Self {
        match user_id {
            Some(_) if is_admin => Visibility::All,
            Some(id) => Visibility::PublicOrOwnedBy(id),
            None => Visibility::PublicOnly,
        }
    }

    /// Whether a recipe with this owner and flag is visible.
    pub fn permits(self, owner_id: DbId, is_public: bool) -> bool {
        match self {
            Visibility::All => true,
            Visibility::PublicOrOwnedBy(id) => is_public || owner_id == id,
            Visibility::PublicOnly => is_public,
        }
    }

    /// `true` when some private recipes must be hidden.
    ///
    /// Bound together with [`Self::owner_id`] into the fixed predicate
    /// `(NOT $a OR r.is_public OR r.user_id = $b)` by the lookups that do
    /// not go through the search builder.
    pub fn is_restricted(self) -> bool {
        self != Visibility::All
    }

    pub fn owner_id(self) -> Option<DbId> {
        match self {
            Visibility::PublicOrOwnedBy(id) => Some(id),
            Visibility::All | Visibility::PublicOnly => None,
        }
    }
}
