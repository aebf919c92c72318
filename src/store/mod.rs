//! Storage collaborators.
//!
//! The resource controller and the account service talk to storage only
//! through these traits. [`postgres`] backs them with PostgreSQL; [`memory`]
//! keeps everything in process for tests.

use async_trait::async_trait;

use campusdesk_core::{AppError, PageWindow};
use campusdesk_models::{EntityRecord, NewUser, RecordPage, ResourceConfig, User, UserCredentials};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryRecordStore, MemoryUserStore};
pub use postgres::{PgRecordStore, PgUserStore};

/// Records addressed by `(collection, field)`.
///
/// `find_page` returns records in ascending id order. `filter`, when present,
/// is a case-insensitive substring match on the resource's field.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, config: ResourceConfig, value: &str) -> Result<EntityRecord, AppError>;

    async fn find_page(
        &self,
        config: ResourceConfig,
        window: PageWindow,
        filter: Option<&str>,
    ) -> Result<RecordPage, AppError>;

    /// `None` when no record has this id.
    async fn update(
        &self,
        config: ResourceConfig,
        id: i64,
        value: &str,
    ) -> Result<Option<EntityRecord>, AppError>;

    /// `false` when no record has this id.
    async fn delete(&self, config: ResourceConfig, id: i64) -> Result<bool, AppError>;
}

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a conflict error when the e-mail is already registered.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserCredentials>, AppError>;

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError>;
}
