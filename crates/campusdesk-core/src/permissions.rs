//! Permission vocabulary for the CampusDesk API.
//!
//! A capability is a `(module, submodule, action)` triple. Roles hold grants
//! for such triples; routes declare the triple they demand, or a bare role
//! name when only that exact role may pass.
//!
//! Route requirements are built from `&'static str` values so they can only
//! come from the route table, never from request data.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::permissions::{Action, PermissionRequirement, modules, roles};
//!
//! let create_school = PermissionRequirement::granular(
//!     modules::SCHOOLS,
//!     modules::SCHOOL_DIRECTORY,
//!     Action::Create,
//! );
//! let admin_only = PermissionRequirement::exact_role(roles::ADMIN);
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operation being gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Single-letter code used in the `permissions` table.
    pub fn code(self) -> &'static str {
        match self {
            Action::Create => "C",
            Action::Read => "R",
            Action::Update => "U",
            Action::Delete => "D",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CREATE" => Ok(Action::Create),
            "R" | "READ" => Ok(Action::Read),
            "U" | "UPDATE" => Ok(Action::Update),
            "D" | "DELETE" => Ok(Action::Delete),
            other => Err(anyhow!("Unknown action code: {}", other)),
        }
    }
}

/// One row of the authorization table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PermissionGrant {
    pub role_id: String,
    pub module: String,
    pub submodule: String,
    pub action: Action,
}

impl PermissionGrant {
    pub fn new(
        role_id: impl Into<String>,
        module: impl Into<String>,
        submodule: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            module: module.into(),
            submodule: submodule.into(),
            action,
        }
    }

    /// Whether this grant covers the given capability.
    pub fn matches(&self, module: &str, submodule: &str, action: Action) -> bool {
        self.action == action && self.module == module && self.submodule == submodule
    }
}

/// What a route demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRequirement {
    /// A grant for the `(module, submodule, action)` triple, or the super-role.
    Granular {
        module: &'static str,
        submodule: &'static str,
        action: Action,
    },
    /// Only this exact role; the super-role gets no implicit pass.
    ExactRole { role_name: &'static str },
}

impl PermissionRequirement {
    pub const fn granular(module: &'static str, submodule: &'static str, action: Action) -> Self {
        PermissionRequirement::Granular {
            module,
            submodule,
            action,
        }
    }

    pub const fn exact_role(role_name: &'static str) -> Self {
        PermissionRequirement::ExactRole { role_name }
    }
}

impl fmt::Display for PermissionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionRequirement::Granular {
                module,
                submodule,
                action,
            } => write!(f, "{}/{}:{}", module, submodule, action),
            PermissionRequirement::ExactRole { role_name } => write!(f, "role:{}", role_name),
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
        }
    }
}

// =============================================================================
// Module / submodule namespaces
// =============================================================================

pub mod modules {
    /// School management
    pub const SCHOOLS: &str = "Schools";
    /// School listing and maintenance
    pub const SCHOOL_DIRECTORY: &str = "School directory";

    /// Service window management
    pub const SERVICE_WINDOWS: &str = "Service Windows";
    /// Service window listing and maintenance
    pub const SERVICE_WINDOW_DIRECTORY: &str = "Service window directory";
}

// =============================================================================
// Well-known roles
// =============================================================================

pub mod roles {
    /// Administrative role; also the default super-role.
    pub const ADMIN: &str = "Admin";
    /// Default role for self-service signups.
    pub const USER: &str = "User";
    /// Back-office staff.
    pub const STAFF: &str = "Staff";
}
