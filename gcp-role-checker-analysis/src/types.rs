//! Wire model of a Google Cloud IAM policy as returned by
//! `gcloud projects get-iam-policy --format=json`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Member tag identifying a service account principal.
pub const SERVICE_ACCOUNT_PREFIX: &str = "serviceAccount:";

/// A tagged principal string, e.g. `serviceAccount:ci@my-project.iam.gserviceaccount.com`,
/// `user:alice@example.com`, `group:admins@example.com` or `domain:example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalRef(String);

impl PrincipalRef {
    pub fn new(member: impl Into<String>) -> Self {
        Self(member.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for members carrying the `serviceAccount:` tag. Other tags are
    /// never reported as role holders.
    pub fn is_service_account(&self) -> bool {
        self.0.starts_with(SERVICE_ACCOUNT_PREFIX)
    }
}

impl fmt::Display for PrincipalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalRef {
    fn from(member: &str) -> Self {
        Self::new(member)
    }
}

impl From<String> for PrincipalRef {
    fn from(member: String) -> Self {
        Self(member)
    }
}

/// IAM condition attached to a binding. Only `title` and `description` are
/// used for reporting; the CEL `expression` is carried but never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl Condition {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            expression: None,
        }
    }

    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

/// One role granted to a set of members, optionally qualified by a condition.
///
/// A binding with a condition is a *conditional* grant (commonly time-bound);
/// one without is *permanent*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    pub role: String,
    pub members: Vec<PrincipalRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl RoleBinding {
    pub fn new<I, M>(role: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<PrincipalRef>,
    {
        Self {
            role: role.into(),
            members: members.into_iter().map(Into::into).collect(),
            condition: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

/// A project IAM policy. Binding order is preserved from the source so that
/// reports are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IamPolicy {
    pub bindings: Vec<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl IamPolicy {
    pub fn new(bindings: Vec<RoleBinding>) -> Self {
        Self {
            bindings,
            etag: None,
            version: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_service_account_tag() {
        assert!(PrincipalRef::from("serviceAccount:ci@p.iam.gserviceaccount.com").is_service_account());
        assert!(!PrincipalRef::from("user:alice@example.com").is_service_account());
        assert!(!PrincipalRef::from("group:serviceAccount@example.com").is_service_account());
        assert!(!PrincipalRef::from("allUsers").is_service_account());
    }

    #[test]
    fn test_condition_description_defaults_to_empty() {
        let condition: Condition =
            serde_json::from_str(r#"{"title": "expirable access"}"#).unwrap();
        assert_eq!(condition.title, "expirable access");
        assert_eq!(condition.description, "");
        assert_eq!(condition.expression, None);
    }

    #[test]
    fn test_binding_serialization_omits_absent_condition() {
        let binding = RoleBinding::new("roles/viewer", ["user:alice@example.com"]);
        let json = serde_json::to_string(&binding).unwrap();
        assert!(!json.contains("condition"));
        assert!(!binding.is_conditional());

        let binding = binding.with_condition(
            Condition::new("temp-access", "30 days")
                .with_expression("request.time < timestamp('2030-01-01T00:00:00Z')"),
        );
        let json = serde_json::to_string(&binding).unwrap();
        assert!(json.contains("\"title\":\"temp-access\""));
        assert!(binding.is_conditional());
    }
}
