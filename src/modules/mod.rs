pub mod auth;
pub mod campuses;
pub mod crud;
pub mod non_working_days;
pub mod programs;
pub mod schools;
pub mod service_windows;
