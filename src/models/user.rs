use serde::Serialize;
use sqlx::FromRow;

/// A registered account. Owns a collection of items through `Item::user_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    /// Unique across all users.
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Ownership is decided by comparing identifiers, never by reference.
    pub fn owns(&self, item: &super::Item) -> bool {
        item.user_id == self.id
    }
}
