//! Parsing of raw IAM policy JSON into a validated [`IamPolicy`].

use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;

use crate::error::{RoleCheckerError, RoleCheckerResult};
use crate::types::IamPolicy;

/// Predefined roles (`roles/<name>`) plus project and organization custom roles.
fn role_pattern() -> &'static Regex {
    static ROLE_PATTERN: OnceLock<Regex> = OnceLock::new();
    ROLE_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:roles|(?:projects|organizations)/[^/\s]+/roles)/[^/\s]+$")
            .expect("role pattern is a valid regex")
    })
}

/// Parse and validate a policy document.
///
/// A missing `bindings` field, a binding with an empty or malformed role, or a
/// binding without members is reported as [`RoleCheckerError::InvalidPolicy`].
pub fn parse_policy(json: &str) -> RoleCheckerResult<IamPolicy> {
    let policy: IamPolicy = serde_json::from_str(json)
        .map_err(|e| RoleCheckerError::invalid_policy(format!("Failed to parse policy JSON: {e}")))?;
    validate_policy(&policy)?;
    debug!("Parsed IAM policy with {} bindings", policy.bindings.len());
    Ok(policy)
}

impl IamPolicy {
    /// Parse a policy from JSON text, see [`parse_policy`].
    pub fn from_json(json: &str) -> RoleCheckerResult<Self> {
        parse_policy(json)
    }

    /// Build a policy from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> RoleCheckerResult<Self> {
        let policy: IamPolicy = serde_json::from_value(value).map_err(|e| {
            RoleCheckerError::invalid_policy(format!("Failed to decode policy document: {e}"))
        })?;
        validate_policy(&policy)?;
        Ok(policy)
    }
}

/// Check the structural invariants of every binding.
pub(crate) fn validate_policy(policy: &IamPolicy) -> RoleCheckerResult<()> {
    for (index, binding) in policy.bindings.iter().enumerate() {
        trace!("Validating binding {}: {}", index, binding.role);
        if binding.role.is_empty() {
            return Err(RoleCheckerError::invalid_policy(format!(
                "binding {index} has an empty role"
            )));
        }
        if !role_pattern().is_match(&binding.role) {
            return Err(RoleCheckerError::invalid_policy(format!(
                "binding {index} has malformed role '{}'",
                binding.role
            )));
        }
        if binding.members.is_empty() {
            return Err(RoleCheckerError::invalid_policy(format!(
                "binding {index} ({}) has no members",
                binding.role
            )));
        }
    }
    Ok(())
}
