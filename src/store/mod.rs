//! Persistence for users and items.
//!
//! Handlers only talk to the [`Store`] trait. [`PgStore`] keeps data in PostgreSQL;
//! [`MemoryStore`] keeps it in process and backs the test suite and database-less runs.
//! Each method is a single atomic operation.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Item, ItemCounts, Partition, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `AppError::BadRequest` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn create_item(&self, user_id: i32, body: &str) -> Result<Item, AppError>;

    async fn find_item(&self, id: i32) -> Result<Option<Item>, AppError>;

    async fn update_item_body(&self, id: i32, body: &str) -> Result<(), AppError>;

    /// Flips `done` and returns the new value.
    async fn toggle_item(&self, id: i32) -> Result<bool, AppError>;

    async fn delete_item(&self, id: i32) -> Result<(), AppError>;

    async fn count_items(&self, user_id: i32) -> Result<ItemCounts, AppError>;

    /// One page of a user's items in `partition`, ordered by id.
    async fn list_items(
        &self,
        user_id: i32,
        partition: Partition,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, AppError>;

    /// Deletes every completed item of the user, returning how many went.
    async fn clear_completed(&self, user_id: i32) -> Result<u64, AppError>;
}

pub(crate) fn username_taken() -> AppError {
    AppError::BadRequest("Username already registered".into())
}
