//! Generic Resource Controller.
//!
//! One instance per concrete entity, configured with a [`ResourceConfig`].
//! All four operations are always available here; which of them a route
//! table exposes is decided in [`super::routes`].

use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, instrument};

use campusdesk_core::{AppError, PageMeta, PageRequest};
use campusdesk_models::{EntityRecord, PaginatedRecordsResponse, ResourceConfig};

use crate::metrics::track_record_mutation;
use crate::store::RecordStore;

/// Longest field value, in characters, that the entity columns hold.
pub const MAX_FIELD_LENGTH: usize = 255;

#[derive(Clone)]
pub struct ResourceController {
    config: ResourceConfig,
    store: Arc<dyn RecordStore>,
}

impl ResourceController {
    pub fn new(config: ResourceConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> ResourceConfig {
        self.config
    }

    fn required_value<'a>(&self, value: &'a str) -> Result<&'a str, AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::validation(anyhow!(
                "{} must not be empty",
                self.config.field_name
            )));
        }
        if value.chars().count() > MAX_FIELD_LENGTH {
            return Err(AppError::validation(anyhow!(
                "{} must be at most {} characters",
                self.config.field_name,
                MAX_FIELD_LENGTH
            )));
        }
        Ok(value)
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found(anyhow!("{} with id {} not found", self.config.kind.label(), id))
    }

    #[instrument(skip(self, value), fields(entity.kind = %self.config.kind))]
    pub async fn create(&self, value: &str) -> Result<EntityRecord, AppError> {
        let value = self.required_value(value)?;
        let record = self.store.insert(self.config, value).await?;

        info!(record.id = %record.id, "Record created");
        track_record_mutation(self.config.kind, "create");

        Ok(record)
    }

    /// Lists one page of records, optionally filtered by a case-insensitive
    /// substring of the resource's field.
    #[instrument(skip(self), fields(entity.kind = %self.config.kind))]
    pub async fn read(
        &self,
        page: i64,
        per_page: i64,
        filter: Option<&str>,
    ) -> Result<PaginatedRecordsResponse, AppError> {
        let request = PageRequest::new(page, per_page)?;
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());

        let result = self
            .store
            .find_page(self.config, request.window(), filter)
            .await?;

        debug!(total = %result.total, returned = %result.items.len(), "Records fetched");

        Ok(PaginatedRecordsResponse {
            data: result
                .items
                .iter()
                .map(|record| record.to_json(self.config.field_name))
                .collect(),
            meta: PageMeta::new(request, result.total),
        })
    }

    #[instrument(skip(self, value), fields(entity.kind = %self.config.kind, record.id = %id))]
    pub async fn update(&self, id: i64, value: &str) -> Result<EntityRecord, AppError> {
        let value = self.required_value(value)?;
        let record = self
            .store
            .update(self.config, id, value)
            .await?
            .ok_or_else(|| self.not_found(id))?;

        info!("Record updated");
        track_record_mutation(self.config.kind, "update");

        Ok(record)
    }

    #[instrument(skip(self), fields(entity.kind = %self.config.kind, record.id = %id))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(self.config, id).await? {
            return Err(self.not_found(id));
        }

        info!("Record deleted");
        track_record_mutation(self.config.kind, "delete");

        Ok(())
    }
}
