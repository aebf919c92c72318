//! Generic CRUD over single-field entities.

pub mod controller;
pub mod handlers;
pub mod routes;

pub use controller::ResourceController;
pub use routes::{Access, ResourceRoutes};
