use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{DatabaseProbe, DbInfo, StoreError};
use crate::auth::{repo::UserStore, repo_types::User};
use crate::profile::{
    repo::WeightLogStore,
    repo_types::{CalorieStrategy, NewWeightEntry, WeightEntry},
};

/// Test double for [`PgStore`](super::PgStore). A single lock makes username
/// uniqueness atomic, like the unique index does in Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    weights: Vec<WeightEntry>,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.inner.lock().expect("memory store poisoned").users.len()
    }

    pub fn weights_for(&self, user_id: i64) -> Vec<WeightEntry> {
        self.inner
            .lock()
            .expect("memory store poisoned")
            .weights
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.users.iter().any(|u| u.username == username))
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        if inner.users.iter().any(|u| u.username == username) {
            return Err(StoreError::UniqueViolation);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: inner.users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            birth_date: None,
            height: None,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn save_profile(&self, user: &User) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let stored = inner
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| StoreError::Corrupt(format!("no user {}", user.id)))?;
        stored.birth_date = user.birth_date;
        stored.height = user.height;
        stored.updated_at = OffsetDateTime::now_utc();
        Ok(stored.clone())
    }
}

#[async_trait]
impl WeightLogStore for MemoryStore {
    async fn append(&self, entry: NewWeightEntry) -> Result<WeightEntry, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let stored = WeightEntry {
            id: inner.weights.len() as i64 + 1,
            user_id: entry.user_id,
            weight: entry.weight,
            goal_weight: entry.goal_weight,
            goal_date: entry.goal_date,
            calorie_strategy: entry.calorie_strategy,
            recorded_at: OffsetDateTime::now_utc(),
        };
        inner.weights.push(stored.clone());
        Ok(stored)
    }

    async fn latest(&self, user_id: i64) -> Result<Option<WeightEntry>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .weights
            .iter()
            .filter(|w| w.user_id == user_id)
            .max_by_key(|w| (w.recorded_at, w.id))
            .cloned())
    }

    async fn first_with_strategy(
        &self,
        user_id: i64,
        strategy: CalorieStrategy,
    ) -> Result<Option<WeightEntry>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .weights
            .iter()
            .filter(|w| w.user_id == user_id && w.calorie_strategy == strategy)
            .min_by_key(|w| (w.recorded_at, w.id))
            .cloned())
    }
}

#[async_trait]
impl DatabaseProbe for MemoryStore {
    async fn describe(&self) -> anyhow::Result<DbInfo> {
        Ok(DbInfo {
            product_name: "MemoryStore".into(),
            product_version: None,
        })
    }
}

/// Probe that always fails, for the DOWN branch of `/db`.
pub struct UnreachableProbe;

#[async_trait]
impl DatabaseProbe for UnreachableProbe {
    async fn describe(&self) -> anyhow::Result<DbInfo> {
        anyhow::bail!("connection refused")
    }
}
