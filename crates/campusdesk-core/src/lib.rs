//! # CampusDesk Core
//!
//! Core types, errors, and utilities for the CampusDesk API.
//!
//! - [`errors`]: Application error type and its HTTP mapping
//! - [`pagination`]: Page window and page-count computation
//! - [`permissions`]: Actions, grants, route requirements and decisions
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::errors::AppError;
//! use campusdesk_core::pagination::compute_window;
//!
//! let window = compute_window(3, 10)?;
//! assert_eq!(window.offset, 20);
//!
//! let error = AppError::not_found(anyhow::anyhow!("School not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use pagination::{PageMeta, PageParams, PageRequest, PageWindow, compute_window, total_pages};
pub use password::{hash_password, verify_password};
pub use permissions::{Action, Decision, PermissionGrant, PermissionRequirement};
