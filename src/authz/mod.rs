//! Authorization: the role → capability model and the gate that consults it.

pub mod gate;
pub mod model;

pub use gate::AuthorizationGate;
pub use model::PermissionModel;
