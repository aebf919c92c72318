//! Generic entity records.
//!
//! Every administrative entity (schools, non-working days, programs,
//! campuses, service windows) has the same shape: an integer id, one
//! free-text attribute and timestamps. [`ResourceConfig`] names the
//! collection and the attribute; [`EntityRecord`] is the stored row.

use std::fmt;

use campusdesk_core::PageMeta;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Closed set of entity collections.
///
/// Storage identifiers are derived from this enum only, never from request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    School,
    NonWorkingDay,
    Program,
    Campus,
    ServiceWindow,
}

impl EntityKind {
    /// Storage collection (table) name.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::School => "schools",
            EntityKind::NonWorkingDay => "non_working_days",
            EntityKind::Program => "programs",
            EntityKind::Campus => "campuses",
            EntityKind::ServiceWindow => "service_windows",
        }
    }

    /// Human-readable singular name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::School => "School",
            EntityKind::NonWorkingDay => "Non-working day",
            EntityKind::Program => "Program",
            EntityKind::Campus => "Campus",
            EntityKind::ServiceWindow => "Service window",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Configuration for one generic resource: which collection, which text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceConfig {
    pub kind: EntityKind,
    pub field_name: &'static str,
}

impl ResourceConfig {
    pub const fn new(kind: EntityKind, field_name: &'static str) -> Self {
        Self { kind, field_name }
    }

    pub const SCHOOLS: ResourceConfig = ResourceConfig::new(EntityKind::School, "name");
    pub const NON_WORKING_DAYS: ResourceConfig =
        ResourceConfig::new(EntityKind::NonWorkingDay, "day");
    pub const PROGRAMS: ResourceConfig = ResourceConfig::new(EntityKind::Program, "name");
    pub const CAMPUSES: ResourceConfig = ResourceConfig::new(EntityKind::Campus, "name");
    pub const SERVICE_WINDOWS: ResourceConfig =
        ResourceConfig::new(EntityKind::ServiceWindow, "name");
}

/// A stored record. `value` holds the resource's single text field.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EntityRecord {
    pub id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntityRecord {
    /// Renders the record with its text field under `field_name`.
    ///
    /// ```json
    /// { "id": 1, "name": "North Campus", "created_at": "...", "updated_at": "..." }
    /// ```
    pub fn to_json(&self, field_name: &str) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert(field_name.to_string(), Value::from(self.value.clone()));
        map.insert(
            "created_at".to_string(),
            Value::from(self.created_at.to_rfc3339()),
        );
        map.insert(
            "updated_at".to_string(),
            Value::from(self.updated_at.to_rfc3339()),
        );
        Value::Object(map)
    }
}

/// One page of records as returned by storage, with the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    pub items: Vec<EntityRecord>,
    pub total: i64,
}

/// Paginated listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedRecordsResponse {
    /// Records rendered with the resource's field name
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_are_distinct() {
        let kinds = [
            EntityKind::School,
            EntityKind::NonWorkingDay,
            EntityKind::Program,
            EntityKind::Campus,
            EntityKind::ServiceWindow,
        ];
        let mut names: Vec<_> = kinds.iter().map(|k| k.collection()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), kinds.len());
    }

    #[test]
    fn test_to_json_uses_field_name() {
        let now = Utc::now();
        let record = EntityRecord {
            id: 3,
            value: "2024-12-25".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = record.to_json(ResourceConfig::NON_WORKING_DAYS.field_name);
        assert_eq!(json["id"], 3);
        assert_eq!(json["day"], "2024-12-25");
        assert!(json.get("value").is_none());
        assert!(json["created_at"].is_string());
    }
}
