//! In-process stores for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use campusdesk_core::{AppError, PageWindow};
use campusdesk_models::{
    EntityKind, EntityRecord, NewUser, RecordPage, ResourceConfig, User, UserCredentials,
};

use super::{RecordStore, UserStore};

#[derive(Debug)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<EntityKind, BTreeMap<i64, EntityRecord>>>,
    next_id: AtomicI64,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, config: ResourceConfig, value: &str) -> Result<EntityRecord, AppError> {
        let now = Utc::now();
        let record = EntityRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.collections
            .write()
            .await
            .entry(config.kind)
            .or_default()
            .insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_page(
        &self,
        config: ResourceConfig,
        window: PageWindow,
        filter: Option<&str>,
    ) -> Result<RecordPage, AppError> {
        let collections = self.collections.read().await;
        let needle = filter.map(str::to_lowercase);

        let matching: Vec<&EntityRecord> = collections
            .get(&config.kind)
            .map(|records| {
                records
                    .values()
                    .filter(|r| match &needle {
                        Some(needle) => r.value.to_lowercase().contains(needle.as_str()),
                        None => true,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(window.offset.max(0) as usize)
            .take(window.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(RecordPage { items, total })
    }

    async fn update(
        &self,
        config: ResourceConfig,
        id: i64,
        value: &str,
    ) -> Result<Option<EntityRecord>, AppError> {
        let mut collections = self.collections.write().await;
        let Some(record) = collections
            .get_mut(&config.kind)
            .and_then(|records| records.get_mut(&id))
        else {
            return Ok(None);
        };

        record.value = value.to_string();
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, config: ResourceConfig, id: i64) -> Result<bool, AppError> {
        Ok(self
            .collections
            .write()
            .await
            .get_mut(&config.kind)
            .and_then(|records| records.remove(&id))
            .is_some())
    }
}

#[derive(Debug)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<i64, UserCredentials>>,
    next_id: AtomicI64,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict(anyhow!("Email already registered")));
        }

        let credentials = UserCredentials {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: user.name,
            email: user.email,
            role: user.role,
            password: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(credentials.id, credentials.clone());

        Ok(credentials.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserCredentials>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
