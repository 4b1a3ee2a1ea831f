//! Least-privilege rule set
//!
//! The roles a project report checks for are an explicit value handed to the
//! analysis at call time, so callers and tests can substitute their own.

use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;

pub const BASIC_ROLES: [&str; 3] = ["roles/owner", "roles/editor", "roles/viewer"];
pub const SERVICE_ACCOUNT_USER_ROLE: &str = "roles/iam.serviceAccountUser";

/// Project-scoped admin role name interpolated from the project id.
///
/// `roles/<project_id>.admin` is not a real predefined role for arbitrary
/// projects; it is kept as a placeholder. Use
/// [`LeastPrivilegeRules::with_admin_role`] to check an actual role instead.
pub fn admin_role(project_id: &str) -> String {
    format!("roles/{project_id}.admin")
}

/// Roles that a service account should not hold without good reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeastPrivilegeRules {
    pub basic_roles: BTreeSet<String>,
    pub admin_role: String,
    pub service_account_user_role: String,
}

impl LeastPrivilegeRules {
    /// Default rules for `project_id`.
    pub fn for_project(project_id: &str) -> Self {
        Self {
            basic_roles: BASIC_ROLES.iter().map(|r| (*r).to_string()).collect(),
            admin_role: admin_role(project_id),
            service_account_user_role: SERVICE_ACCOUNT_USER_ROLE.to_string(),
        }
    }

    /// Replace the placeholder admin role.
    #[must_use]
    pub fn with_admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = role.into();
        self
    }

    pub fn admin_roles(&self) -> BTreeSet<String> {
        BTreeSet::from([self.admin_role.clone()])
    }

    pub fn service_account_user_roles(&self) -> BTreeSet<String> {
        BTreeSet::from([self.service_account_user_role.clone()])
    }

    /// True while the admin role is still the interpolated placeholder.
    pub fn uses_placeholder_admin_role(&self, project_id: &str) -> bool {
        self.admin_role == admin_role(project_id)
    }

    pub(crate) fn warn_on_placeholder(&self, project_id: &str) {
        if self.uses_placeholder_admin_role(project_id) {
            warn!(
                "Admin role '{}' is a placeholder built from the project id and may not exist",
                self.admin_role
            );
        }
    }
}
