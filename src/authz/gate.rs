use std::sync::Arc;

use anyhow::anyhow;
use campusdesk_auth::Principal;
use campusdesk_core::{AppError, Decision, PermissionRequirement};
use tracing::debug;

use crate::metrics::track_authorization_decision;

use super::model::PermissionModel;

/// Decides allow/deny for a principal against a route requirement.
///
/// - `Granular`: allowed if the principal carries the super-role or its role
///   holds a grant for the exact triple.
/// - `ExactRole`: allowed only if the role identifier equals the named role.
///   The super-role gets no implicit pass here.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    model: Arc<PermissionModel>,
}

impl AuthorizationGate {
    pub fn new(model: Arc<PermissionModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &PermissionModel {
        &self.model
    }

    pub fn authorize(
        &self,
        principal: &Principal,
        requirement: &PermissionRequirement,
    ) -> Decision {
        let allowed = match *requirement {
            PermissionRequirement::ExactRole { role_name } => principal.role_id == role_name,
            PermissionRequirement::Granular {
                module,
                submodule,
                action,
            } => {
                principal.is_super_role
                    || self
                        .model
                        .has_grant(&principal.role_id, module, submodule, action)
            }
        };

        let decision = if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        };

        debug!(
            user.id = %principal.user_id,
            user.role = %principal.role_id,
            requirement = %requirement,
            decision = decision.as_str(),
            "Authorization decision"
        );
        track_authorization_decision(requirement, decision);

        decision
    }

    /// Like [`authorize`](Self::authorize) but turns a deny into an authorization error.
    pub fn check(
        &self,
        principal: &Principal,
        requirement: &PermissionRequirement,
    ) -> Result<(), AppError> {
        match self.authorize(principal, requirement) {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(AppError::forbidden(anyhow!(
                "Access denied. Missing required permission: {}",
                requirement
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::permissions::{modules, roles};
    use campusdesk_core::{Action, ErrorKind, PermissionGrant};

    const UPDATE_SCHOOL: PermissionRequirement = PermissionRequirement::granular(
        modules::SCHOOLS,
        modules::SCHOOL_DIRECTORY,
        Action::Update,
    );
    const ADMIN_ONLY: PermissionRequirement = PermissionRequirement::exact_role(roles::ADMIN);

    fn gate_with(grants: Vec<PermissionGrant>) -> AuthorizationGate {
        AuthorizationGate::new(Arc::new(PermissionModel::new(roles::ADMIN, grants)))
    }

    fn staff() -> Principal {
        Principal::new(2, roles::STAFF, false)
    }

    fn admin() -> Principal {
        Principal::new(1, roles::ADMIN, true)
    }

    #[test]
    fn test_granular_allows_with_grant() {
        let gate = gate_with(vec![PermissionGrant::new(
            roles::STAFF,
            modules::SCHOOLS,
            modules::SCHOOL_DIRECTORY,
            Action::Update,
        )]);

        assert_eq!(gate.authorize(&staff(), &UPDATE_SCHOOL), Decision::Allow);
    }

    #[test]
    fn test_granular_denies_without_grant() {
        let gate = gate_with(vec![PermissionGrant::new(
            roles::STAFF,
            modules::SCHOOLS,
            modules::SCHOOL_DIRECTORY,
            Action::Create,
        )]);

        assert_eq!(gate.authorize(&staff(), &UPDATE_SCHOOL), Decision::Deny);
    }

    #[test]
    fn test_granular_super_role_bypass() {
        let gate = gate_with(Vec::new());
        assert_eq!(gate.authorize(&admin(), &UPDATE_SCHOOL), Decision::Allow);
    }

    #[test]
    fn test_exact_role_allows_matching_role() {
        let gate = gate_with(Vec::new());
        assert_eq!(gate.authorize(&admin(), &ADMIN_ONLY), Decision::Allow);
    }

    #[test]
    fn test_exact_role_ignores_grants() {
        let gate = gate_with(vec![PermissionGrant::new(
            roles::STAFF,
            modules::SCHOOLS,
            modules::SCHOOL_DIRECTORY,
            Action::Update,
        )]);
        assert_eq!(gate.authorize(&staff(), &ADMIN_ONLY), Decision::Deny);
    }

    #[test]
    fn test_exact_role_has_no_super_role_bypass() {
        // Super-role "Root" passes every granular check but not a check for "Admin".
        let gate = AuthorizationGate::new(Arc::new(PermissionModel::new("Root", Vec::new())));
        let root = Principal::new(1, "Root", true);

        assert_eq!(gate.authorize(&root, &UPDATE_SCHOOL), Decision::Allow);
        assert_eq!(gate.authorize(&root, &ADMIN_ONLY), Decision::Deny);
    }

    #[test]
    fn test_check_maps_deny_to_authorization_error() {
        let gate = gate_with(Vec::new());
        let err = gate.check(&staff(), &UPDATE_SCHOOL).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(gate.check(&admin(), &UPDATE_SCHOOL).is_ok());
    }
}
