use std::collections::HashMap;

use axum::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::dto::{User, UserPayload};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("user id space exhausted")]
    IdsExhausted,
}

/// Storage seam for user records.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> Vec<User>;
    async fn get(&self, id: u64) -> Option<User>;
    /// Stores a new record. The payload's `id` and `created_at` are ignored.
    async fn create(&self, payload: UserPayload) -> Result<User, RepoError>;
    /// Merges `patch` into the record with `patch.id`, returning the merged record.
    /// A negative id never matches.
    async fn update(&self, patch: &UserPayload) -> Option<User>;
    async fn delete(&self, id: u64) -> Option<User>;
}

#[derive(Debug, Default)]
struct Table {
    users: HashMap<u64, User>,
    last_id: u64,
}

/// Process-local store. Ids are assigned under the write lock and never reused.
#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    table: RwLock<Table>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list(&self) -> Vec<User> {
        self.table.read().await.users.values().cloned().collect()
    }

    async fn get(&self, id: u64) -> Option<User> {
        self.table.read().await.users.get(&id).cloned()
    }

    async fn create(&self, payload: UserPayload) -> Result<User, RepoError> {
        let mut table = self.table.write().await;
        let id = table.last_id.checked_add(1).ok_or(RepoError::IdsExhausted)?;
        table.last_id = id;

        let user = User {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            created_at: OffsetDateTime::now_utc(),
        };
        table.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, patch: &UserPayload) -> Option<User> {
        let id = u64::try_from(patch.id).ok()?;
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&id)?;
        patch.apply_to(user);
        Some(user.clone())
    }

    async fn delete(&self, id: u64) -> Option<User> {
        self.table.write().await.users.remove(&id)
    }
}
