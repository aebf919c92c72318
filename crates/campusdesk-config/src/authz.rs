//! Authorization settings.
//!
//! - `SUPER_ROLE`: role identifier that bypasses granular permission checks
//!   (default: `Admin`)
//! - `DEFAULT_ROLE`: role given to accounts created through signup
//!   (default: `User`)

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthzConfig {
    pub super_role: String,
    pub default_role: String,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            super_role: "Admin".to_string(),
            default_role: "User".to_string(),
        }
    }
}

impl AuthzConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            super_role: non_empty_var("SUPER_ROLE").unwrap_or(defaults.super_role),
            default_role: non_empty_var("DEFAULT_ROLE").unwrap_or(defaults.default_role),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthzConfig::default();
        assert_eq!(config.super_role, "Admin");
        assert_eq!(config.default_role, "User");
    }
}
