//! # CampusDesk Config
//!
//! Configuration types for the CampusDesk API, loaded from environment variables:
//!
//! - [`authz`]: Super-role and default signup role
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`jwt`]: JWT authentication configuration
//! - [`server`]: Listener address, logging and metrics toggles
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{AuthzConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let authz_config = AuthzConfig::from_env();
//! ```

pub mod authz;
pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use authz::AuthzConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
