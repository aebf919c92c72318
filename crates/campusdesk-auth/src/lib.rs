//! # CampusDesk Auth
//!
//! Authentication types and JWT utilities for the CampusDesk API.
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification
//! - [`principal`]: The authenticated identity handed to the authorization layer

pub mod claims;
pub mod jwt;
pub mod principal;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use principal::Principal;
