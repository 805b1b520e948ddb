//! PostgreSQL-backed store.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds without a
//! live database. The schema lives in `migrations/` and is applied by [`PgStore::migrate`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{username_taken, Store};
use crate::error::AppError;
use crate::models::{Item, ItemCounts, Partition, User};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        Ok(Self::new(PgPool::connect(database_url).await?))
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {}", e)))
    }
}

fn expect_one_row(rows_affected: u64) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::not_found());
    }
    Ok(())
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                username_taken()
            }
            other => other.into(),
        })
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT id, username, password_hash FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_item(&self, user_id: i32, body: &str) -> Result<Item, AppError> {
        Ok(sqlx::query_as::<_, Item>(
            "INSERT INTO items (body, user_id) VALUES ($1, $2) RETURNING id, body, done, user_id",
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find_item(&self, id: i32) -> Result<Option<Item>, AppError> {
        Ok(
            sqlx::query_as::<_, Item>("SELECT id, body, done, user_id FROM items WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update_item_body(&self, id: i32, body: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE items SET body = $1 WHERE id = $2")
            .bind(body)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result.rows_affected())
    }

    async fn toggle_item(&self, id: i32) -> Result<bool, AppError> {
        let (done,) = sqlx::query_as::<_, (bool,)>(
            "UPDATE items SET done = NOT done WHERE id = $1 RETURNING done",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(done)
    }

    async fn delete_item(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result.rows_affected())
    }

    async fn count_items(&self, user_id: i32) -> Result<ItemCounts, AppError> {
        let (all, active, completed) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE NOT done), \
                    COUNT(*) FILTER (WHERE done) \
             FROM items WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ItemCounts {
            all,
            active,
            completed,
        })
    }

    async fn list_items(
        &self,
        user_id: i32,
        partition: Partition,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, AppError> {
        // A NULL filter selects every item.
        Ok(sqlx::query_as::<_, Item>(
            "SELECT id, body, done, user_id FROM items \
             WHERE user_id = $1 AND ($2::BOOLEAN IS NULL OR done = $2) \
             ORDER BY id LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(partition.done_filter())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn clear_completed(&self, user_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM items WHERE user_id = $1 AND done")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
