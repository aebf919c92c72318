//! # CampusDesk Models
//!
//! Domain models and DTOs for the CampusDesk API.
//!
//! - [`records`]: Generic entity records and resource configuration
//! - [`users`]: User accounts and authentication DTOs

pub mod records;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use records::{EntityKind, EntityRecord, PaginatedRecordsResponse, RecordPage, ResourceConfig};
pub use users::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, NewUser, SignupRequest,
    User, UserCredentials,
};
