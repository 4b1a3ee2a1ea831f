//! Per-account role lookup.

use log::debug;

use super::Classification;
use crate::types::{IamPolicy, SERVICE_ACCOUNT_PREFIX};

/// Every role held by members starting with `serviceAccount:<account_email>`.
///
/// The match is a plain prefix match: an empty or truncated email matches
/// every service account sharing that prefix. No match yields an empty
/// classification.
pub fn roles_for_account(policy: &IamPolicy, account_email: &str) -> Classification {
    let needle = format!("{SERVICE_ACCOUNT_PREFIX}{account_email}");
    let mut classification = Classification::default();

    for binding in &policy.bindings {
        classification.record(
            binding,
            binding
                .members
                .iter()
                .filter(|m| m.as_str().starts_with(&needle)),
        );
    }

    debug!(
        "Found {} roles for service account prefix '{}'",
        classification.len(),
        account_email
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, PrincipalRef, RoleBinding};

    fn sample_policy() -> IamPolicy {
        IamPolicy::new(vec![
            RoleBinding::new(
                "roles/owner",
                ["serviceAccount:sa1@p.iam", "user:u@p.com"],
            ),
            RoleBinding::new("roles/storage.admin", ["serviceAccount:sa10@p.iam"]),
            RoleBinding::new("roles/pubsub.editor", ["serviceAccount:sa1@p.iam"])
                .with_condition(Condition::new("temp-access", "30 days")),
            RoleBinding::new("roles/viewer", ["user:sa1@p.iam"]),
        ])
    }

    #[test]
    fn test_roles_for_account_exact_email() {
        let classification = roles_for_account(&sample_policy(), "sa1@p.iam");

        let roles: Vec<&str> = classification.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec!["roles/owner", "roles/pubsub.editor"]);
        let pubsub = classification.get("roles/pubsub.editor").expect("pubsub role");
        assert!(pubsub.permanent.is_empty());
        assert_eq!(pubsub.conditional[0].condition.title, "temp-access");
    }

    #[test]
    fn test_roles_for_account_is_a_prefix_match() {
        let classification = roles_for_account(&sample_policy(), "sa1");

        let roles: Vec<&str> = classification.iter().map(|(role, _)| role).collect();
        assert_eq!(
            roles,
            vec!["roles/owner", "roles/storage.admin", "roles/pubsub.editor"]
        );
    }

    #[test]
    fn test_roles_for_account_empty_email_matches_every_service_account() {
        let classification = roles_for_account(&sample_policy(), "");

        assert_eq!(classification.len(), 3);
        assert!(classification.get("roles/viewer").is_none());
        let owners = &classification.get("roles/owner").expect("owner").permanent;
        assert_eq!(owners, &vec![PrincipalRef::from("serviceAccount:sa1@p.iam")]);
    }

    #[test]
    fn test_roles_for_account_ignores_non_service_account_members() {
        let policy = IamPolicy::new(vec![
            RoleBinding::new("roles/owner", ["user:sa1@p.iam"]),
            RoleBinding::new("roles/editor", ["group:sa1@p.iam"]),
        ]);
        assert!(roles_for_account(&policy, "sa1@p.iam").is_empty());
    }
}
