use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};

use campusdesk_core::{AppError, PageWindow};
use campusdesk_models::{EntityRecord, NewUser, RecordPage, ResourceConfig, User, UserCredentials};

use super::{RecordStore, UserStore};

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn storage_error(context: &str, config: ResourceConfig, e: sqlx::Error) -> AppError {
    error!(error = %e, db.table = config.kind.collection(), "{}", context);
    AppError::storage(anyhow!("{}: {}", context, e))
}

/// PostgreSQL-backed records. Table and column names come from
/// [`ResourceConfig`] constants only, so they are safe to interpolate.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[instrument(skip(self, value), fields(db.operation = "INSERT", db.table = config.kind.collection()))]
    async fn insert(&self, config: ResourceConfig, value: &str) -> Result<EntityRecord, AppError> {
        let sql = format!(
            "INSERT INTO {table} ({field}) VALUES ($1)
             RETURNING id, {field} AS value, created_at, updated_at",
            table = config.kind.collection(),
            field = config.field_name,
        );

        sqlx::query_as::<_, EntityRecord>(&sql)
            .bind(value)
            .fetch_one(&self.db)
            .await
            .map_err(|e| storage_error("Failed to insert record", config, e))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = config.kind.collection()))]
    async fn find_page(
        &self,
        config: ResourceConfig,
        window: PageWindow,
        filter: Option<&str>,
    ) -> Result<RecordPage, AppError> {
        let table = config.kind.collection();
        let field = config.field_name;
        let pattern = filter.map(like_pattern);
        let where_clause = if pattern.is_some() {
            format!(" WHERE {} ILIKE $1", field)
        } else {
            String::new()
        };

        let count_sql = format!("SELECT COUNT(*) FROM {}{}", table, where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query
            .fetch_one(&self.db)
            .await
            .map_err(|e| storage_error("Failed to count records", config, e))?;

        let data_sql = format!(
            "SELECT id, {field} AS value, created_at, updated_at FROM {table}{where_clause}
             ORDER BY id ASC LIMIT {limit} OFFSET {offset}",
            field = field,
            table = table,
            where_clause = where_clause,
            limit = window.limit,
            offset = window.offset,
        );
        let mut data_query = sqlx::query_as::<_, EntityRecord>(&data_sql);
        if let Some(pattern) = &pattern {
            data_query = data_query.bind(pattern);
        }
        let items = data_query
            .fetch_all(&self.db)
            .await
            .map_err(|e| storage_error("Failed to fetch records", config, e))?;

        debug!(total = %total, returned = %items.len(), "Fetched record page");

        Ok(RecordPage { items, total })
    }

    #[instrument(skip(self, value), fields(db.operation = "UPDATE", db.table = config.kind.collection()))]
    async fn update(
        &self,
        config: ResourceConfig,
        id: i64,
        value: &str,
    ) -> Result<Option<EntityRecord>, AppError> {
        let sql = format!(
            "UPDATE {table} SET {field} = $1, updated_at = NOW() WHERE id = $2
             RETURNING id, {field} AS value, created_at, updated_at",
            table = config.kind.collection(),
            field = config.field_name,
        );

        sqlx::query_as::<_, EntityRecord>(&sql)
            .bind(value)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| storage_error("Failed to update record", config, e))
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = config.kind.collection()))]
    async fn delete(&self, config: ResourceConfig, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", config.kind.collection());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| storage_error("Failed to delete record", config, e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, user), fields(user.email = %user.email, db.operation = "INSERT", db.table = "users"))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, role, created_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %user.email, "Attempted to register an existing email");
                return AppError::conflict(anyhow!("Email already registered"));
            }
            error!(error = %e, "Database error creating user");
            AppError::storage(anyhow!("Failed to create user: {}", e))
        })
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, role, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::storage(anyhow!("Failed to fetch user: {}", e)))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<UserCredentials>, AppError> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, role, password, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::storage(anyhow!("Failed to fetch user: {}", e)))
    }

    #[instrument(skip(self, password_hash), fields(db.operation = "UPDATE", db.table = "users"))]
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::storage(anyhow!("Failed to update password: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
