//! Plain-text report rendering
//!
//! Output is a pure function of the classification and labels, so the same
//! policy always renders the same text.

use std::collections::BTreeSet;

use crate::classification::Classification;
use crate::commands::ProjectReport;
use crate::types::Condition;

fn condition_label(condition: &Condition) -> String {
    format!("{} ({})", condition.title, condition.description)
}

/// One line per holder: permanent grants first, then conditional grants, role by role.
fn write_grants(out: &mut String, classification: &Classification) {
    for (role, holders) in classification.iter() {
        for principal in &holders.permanent {
            out.push_str(&format!("{principal} has role: {role}\n"));
        }
        for grant in &holders.conditional {
            out.push_str(&format!(
                "{} has role: {role} with condition: {}\n",
                grant.principal,
                condition_label(&grant.condition)
            ));
        }
    }
}

/// Render one labeled section, e.g. `label = "basic"`.
pub fn render(classification: &Classification, label: &str) -> String {
    let mut out = String::new();
    if classification.is_empty() {
        out.push_str(&format!("No service accounts with {label} roles found.\n"));
    } else {
        write_grants(&mut out, classification);
    }
    out
}

/// Render the `serviceAccountUser` section. Unconditional grants of this role
/// at project scope let the holder impersonate every service account in the
/// project, so they get a warning line up front.
pub fn render_service_account_user(classification: &Classification, role: &str) -> String {
    let mut out = String::new();
    if classification.is_empty() {
        out.push_str("No service account user roles found.\n");
        return out;
    }
    if classification.has_permanent_grants() {
        out.push_str(&format!(
            "Warning: {role} should not be assigned at project level for least privilege.\n"
        ));
    }
    write_grants(&mut out, classification);
    out.push_str(&format!("Check completed for {role}.\n"));
    out
}

/// Render the roles found for one service account. An empty email matched
/// every service account, and the header says so.
pub fn render_account_roles(classification: &Classification, account_email: &str) -> String {
    let mut out = String::new();
    match (classification.is_empty(), account_email.is_empty()) {
        (true, false) => {
            out.push_str(&format!("No roles found for service account {account_email}.\n"));
        }
        (true, true) => out.push_str("No roles found for any service account.\n"),
        (false, false) => {
            out.push_str(&format!("Roles for service account {account_email}:\n"));
            write_grants(&mut out, classification);
        }
        (false, true) => {
            out.push_str("Roles for all service accounts:\n");
            write_grants(&mut out, classification);
        }
    }
    out
}

/// Render a full project report: basic, admin, serviceAccountUser, then the account lookup.
pub fn render_report(report: &ProjectReport) -> String {
    [
        render(&report.basic, "basic"),
        render(&report.admin, "admin"),
        render_service_account_user(
            &report.service_account_user,
            &report.rules.service_account_user_role,
        ),
        render_account_roles(&report.account_roles, &report.account),
    ]
    .concat()
}

/// Render the used-services audit result.
pub fn render_used_services(services: &BTreeSet<String>) -> String {
    if services.is_empty() {
        return "No services found.\n".to_string();
    }
    let mut out = String::from("Services in use:\n");
    for service in services {
        out.push_str(&format!("  {service}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{classify, roles_for_account};
    use crate::types::{IamPolicy, RoleBinding};

    fn roles(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_render_permanent_line() {
        let policy = IamPolicy::new(vec![RoleBinding::new(
            "roles/owner",
            ["serviceAccount:sa1@p.iam", "user:u@p.com"],
        )]);
        let classification = classify(&policy, &roles(&["roles/owner"]));

        assert_eq!(
            render(&classification, "basic"),
            "serviceAccount:sa1@p.iam has role: roles/owner\n"
        );
    }

    #[test]
    fn test_render_conditional_line() {
        let policy = IamPolicy::new(vec![
            RoleBinding::new("roles/editor", ["serviceAccount:sa1@p.iam"])
                .with_condition(Condition::new("temp-access", "30 days")),
            RoleBinding::new("roles/editor", ["serviceAccount:sa1@p.iam"]),
        ]);
        let classification = classify(&policy, &roles(&["roles/editor"]));

        assert_eq!(
            render(&classification, "basic"),
            "serviceAccount:sa1@p.iam has role: roles/editor\n\
             serviceAccount:sa1@p.iam has role: roles/editor with condition: temp-access (30 days)\n"
        );
    }

    #[test]
    fn test_render_condition_with_empty_description() {
        let policy = IamPolicy::new(vec![RoleBinding::new(
            "roles/viewer",
            ["serviceAccount:sa1@p.iam"],
        )
        .with_condition(Condition::new("business-hours", ""))]);
        let classification = classify(&policy, &roles(&["roles/viewer"]));

        assert_eq!(
            render(&classification, "basic"),
            "serviceAccount:sa1@p.iam has role: roles/viewer with condition: business-hours ()\n"
        );
    }

    #[test]
    fn test_render_parsed_condition_with_empty_description() {
        let policy = crate::parse_policy(
            r#"{"bindings": [{"role": "roles/owner", "members": ["serviceAccount:a@p.iam"],
                "condition": {"title": "t", "description": ""}}]}"#,
        )
        .expect("should parse");
        let classification = classify(&policy, &roles(&["roles/owner"]));

        assert_eq!(
            render(&classification, "basic"),
            "serviceAccount:a@p.iam has role: roles/owner with condition: t ()\n"
        );
    }

    #[test]
    fn test_render_empty_section() {
        assert_eq!(
            render(&Classification::default(), "admin"),
            "No service accounts with admin roles found.\n"
        );
    }

    #[test]
    fn test_render_service_account_user_warns_on_permanent_grant() {
        let policy = IamPolicy::new(vec![RoleBinding::new(
            "roles/iam.serviceAccountUser",
            ["serviceAccount:deployer@p.iam"],
        )]);
        let classification = classify(&policy, &roles(&["roles/iam.serviceAccountUser"]));

        let text = render_service_account_user(&classification, "roles/iam.serviceAccountUser");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Warning: roles/iam.serviceAccountUser should not be assigned at project level for least privilege.",
                "serviceAccount:deployer@p.iam has role: roles/iam.serviceAccountUser",
                "Check completed for roles/iam.serviceAccountUser.",
            ]
        );
    }

    #[test]
    fn test_render_service_account_user_conditional_only_has_no_warning() {
        let policy = IamPolicy::new(vec![RoleBinding::new(
            "roles/iam.serviceAccountUser",
            ["serviceAccount:deployer@p.iam"],
        )
        .with_condition(Condition::new("temp-access", "30 days"))]);
        let classification = classify(&policy, &roles(&["roles/iam.serviceAccountUser"]));

        let text = render_service_account_user(&classification, "roles/iam.serviceAccountUser");
        assert!(!text.contains("Warning"));
        assert!(text.contains("with condition: temp-access (30 days)"));
    }

    #[test]
    fn test_render_service_account_user_empty() {
        assert_eq!(
            render_service_account_user(&Classification::default(), "roles/iam.serviceAccountUser"),
            "No service account user roles found.\n"
        );
    }

    #[test]
    fn test_render_account_roles_none_found() {
        let policy = IamPolicy::new(vec![RoleBinding::new("roles/owner", ["user:sa1@p.iam"])]);
        let classification = roles_for_account(&policy, "sa1@p.iam");

        assert_eq!(
            render_account_roles(&classification, "sa1@p.iam"),
            "No roles found for service account sa1@p.iam.\n"
        );
    }

    #[test]
    fn test_render_account_roles_header() {
        let policy = IamPolicy::new(vec![RoleBinding::new(
            "roles/run.invoker",
            ["serviceAccount:sa1@p.iam"],
        )]);
        let classification = roles_for_account(&policy, "sa1@p.iam");

        assert_eq!(
            render_account_roles(&classification, "sa1@p.iam"),
            "Roles for service account sa1@p.iam:\n\
             serviceAccount:sa1@p.iam has role: roles/run.invoker\n"
        );
    }

    #[test]
    fn test_render_account_roles_empty_email() {
        let policy = IamPolicy::new(vec![
            RoleBinding::new("roles/run.invoker", ["serviceAccount:sa1@p.iam"]),
            RoleBinding::new("roles/viewer", ["serviceAccount:sa2@p.iam"]),
        ]);

        assert_eq!(
            render_account_roles(&roles_for_account(&policy, ""), ""),
            "Roles for all service accounts:\n\
             serviceAccount:sa1@p.iam has role: roles/run.invoker\n\
             serviceAccount:sa2@p.iam has role: roles/viewer\n"
        );
        assert_eq!(
            render_account_roles(&Classification::default(), ""),
            "No roles found for any service account.\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let policy = IamPolicy::new(vec![
            RoleBinding::new("roles/viewer", ["serviceAccount:b@p.iam", "serviceAccount:a@p.iam"]),
            RoleBinding::new("roles/owner", ["serviceAccount:c@p.iam"]),
        ]);
        let wanted = roles(&["roles/owner", "roles/viewer"]);

        let first = render(&classify(&policy, &wanted), "basic");
        let second = render(&classify(&policy, &wanted), "basic");
        assert_eq!(first, second);
        assert!(first.starts_with("serviceAccount:b@p.iam has role: roles/viewer\n"));
    }

    #[test]
    fn test_render_used_services() {
        let services: BTreeSet<String> = ["storage.googleapis.com", "compute.googleapis.com"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(
            render_used_services(&services),
            "Services in use:\n  compute.googleapis.com\n  storage.googleapis.com\n"
        );
        assert_eq!(render_used_services(&BTreeSet::new()), "No services found.\n");
    }
}
