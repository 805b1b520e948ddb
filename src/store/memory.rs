use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{username_taken, Store};
use crate::error::AppError;
use crate::models::{Item, ItemCounts, Partition, User};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i32, User>,
    items: BTreeMap<i32, Item>,
    next_user_id: i32,
    next_item_id: i32,
}

impl State {
    fn item_mut(&mut self, id: i32) -> Result<&mut Item, AppError> {
        self.items.get_mut(&id).ok_or_else(AppError::not_found)
    }
}

/// In-process store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|user| user.username == username) {
            return Err(username_taken());
        }
        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_item(&self, user_id: i32, body: &str) -> Result<Item, AppError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        state.next_item_id += 1;
        let item = Item {
            id: state.next_item_id,
            body: body.to_string(),
            done: false,
            user_id,
        };
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: i32) -> Result<Option<Item>, AppError> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn update_item_body(&self, id: i32, body: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.item_mut(id)?.body = body.to_string();
        Ok(())
    }

    async fn toggle_item(&self, id: i32) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let item = state.item_mut(id)?;
        item.done = !item.done;
        Ok(item.done)
    }

    async fn delete_item(&self, id: i32) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(AppError::not_found)
    }

    async fn count_items(&self, user_id: i32) -> Result<ItemCounts, AppError> {
        let state = self.state.read().await;
        Ok(ItemCounts::from_items(
            state.items.values().filter(|item| item.user_id == user_id),
        ))
    }

    async fn list_items(
        &self,
        user_id: i32,
        partition: Partition,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .filter(|item| item.user_id == user_id && partition.contains(item))
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn clear_completed(&self, user_id: i32) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let before = state.items.len();
        state
            .items
            .retain(|_, item| !(item.user_id == user_id && item.done));
        Ok((before - state.items.len()) as u64)
    }
}
