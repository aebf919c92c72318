//! Role → capability mapping.
//!
//! Built once at startup (from the `permissions` table or from a fixed list of
//! grants) and shared read-only by `Arc`. There are no mutation operations.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use campusdesk_core::{Action, AppError, PermissionGrant};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct PermissionModel {
    grants: HashMap<String, HashSet<PermissionGrant>>,
    super_role: String,
    empty: HashSet<PermissionGrant>,
}

impl PermissionModel {
    pub fn new(
        super_role: impl Into<String>,
        grants: impl IntoIterator<Item = PermissionGrant>,
    ) -> Self {
        let mut by_role: HashMap<String, HashSet<PermissionGrant>> = HashMap::new();
        for grant in grants {
            by_role
                .entry(grant.role_id.clone())
                .or_default()
                .insert(grant);
        }

        Self {
            grants: by_role,
            super_role: super_role.into(),
            empty: HashSet::new(),
        }
    }

    /// The role's capability set. Unknown roles get the empty set.
    pub fn grants(&self, role_id: &str) -> &HashSet<PermissionGrant> {
        self.grants.get(role_id).unwrap_or(&self.empty)
    }

    /// Whether the role holds a grant for the exact triple.
    pub fn has_grant(&self, role_id: &str, module: &str, submodule: &str, action: Action) -> bool {
        self.grants(role_id)
            .iter()
            .any(|grant| grant.matches(module, submodule, action))
    }

    /// True only for the reserved administrative role identifier.
    pub fn is_super_role(&self, role_id: &str) -> bool {
        !self.super_role.is_empty() && role_id == self.super_role
    }

    pub fn super_role(&self) -> &str {
        &self.super_role
    }

    /// Reads every grant from the database.
    ///
    /// Rows with an unknown action code are skipped with a warning.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "permissions"))]
    pub async fn load(db: &PgPool, super_role: &str) -> Result<Self, AppError> {
        let rows = sqlx::query_as::<_, (String, String, String, String)>(
            "SELECT r.name, m.name, s.submodule, p.action::TEXT
             FROM permissions p
             JOIN roles r ON r.id = p.role_id
             JOIN submodules s ON s.id = p.submodule_id
             JOIN modules m ON m.id = s.module_id",
        )
        .fetch_all(db)
        .await
        .map_err(|e| AppError::storage(anyhow!("Failed to load permission grants: {}", e)))?;

        let total_rows = rows.len();
        let grants: Vec<PermissionGrant> = rows
            .into_iter()
            .filter_map(|(role, module, submodule, code)| match code.parse::<Action>() {
                Ok(action) => Some(PermissionGrant::new(role, module, submodule, action)),
                Err(e) => {
                    warn!(role = %role, module = %module, submodule = %submodule, error = %e, "Skipping grant with unknown action");
                    None
                }
            })
            .collect();

        info!(
            grants = grants.len(),
            skipped = total_rows - grants.len(),
            super_role = %super_role,
            "Permission model loaded"
        );

        Ok(Self::new(super_role, grants))
    }
}
