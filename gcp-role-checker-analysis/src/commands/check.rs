//! Least-privilege check of one project's IAM policy

use log::info;
use serde::Serialize;

use crate::classification::{classify, roles_for_account, Classification};
use crate::error::RoleCheckerResult;
use crate::parsing::validate_project_id;
use crate::rules::LeastPrivilegeRules;
use crate::source::PolicySource;
use crate::types::IamPolicy;

/// Everything one check run found, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project_id: String,
    pub rules: LeastPrivilegeRules,
    pub basic: Classification,
    pub admin: Classification,
    pub service_account_user: Classification,
    pub account: String,
    pub account_roles: Classification,
}

/// Classify `policy` against each rule independently and look up the roles
/// of `account_email` (prefix match, see [`roles_for_account`]).
pub fn analyze(
    project_id: &str,
    policy: &IamPolicy,
    rules: &LeastPrivilegeRules,
    account_email: &str,
) -> ProjectReport {
    rules.warn_on_placeholder(project_id);

    ProjectReport {
        project_id: project_id.to_string(),
        rules: rules.clone(),
        basic: classify(policy, &rules.basic_roles),
        admin: classify(policy, &rules.admin_roles()),
        service_account_user: classify(policy, &rules.service_account_user_roles()),
        account: account_email.to_string(),
        account_roles: roles_for_account(policy, account_email),
    }
}

impl<S: PolicySource> super::service::RoleCheckerService<S> {
    /// Fetch the project's policy and analyze it.
    ///
    /// A fetch failure is returned as-is; no partial report is produced.
    pub fn check_project(
        &self,
        project_id: &str,
        rules: &LeastPrivilegeRules,
        account_email: &str,
    ) -> RoleCheckerResult<ProjectReport> {
        validate_project_id(project_id)?;
        let policy = self.source.fetch_iam_policy(project_id)?;
        let report = analyze(project_id, &policy, rules, account_email);
        info!(
            "Checked {} bindings: {} basic, {} admin, {} serviceAccountUser, {} account roles",
            policy.bindings.len(),
            report.basic.len(),
            report.admin.len(),
            report.service_account_user.len(),
            report.account_roles.len()
        );
        Ok(report)
    }
}
