//! Project id validation, applied before any command is issued against a project.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{RoleCheckerError, RoleCheckerResult};

fn project_id_pattern() -> &'static Regex {
    static PROJECT_ID_PATTERN: OnceLock<Regex> = OnceLock::new();
    // Legacy domain-scoped projects look like `example.com:my-project`.
    PROJECT_ID_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[a-z0-9.-]+:)?[a-z][a-z0-9-]{4,28}[a-z0-9]$")
            .expect("project id pattern is a valid regex")
    })
}

/// Reject project ids that Google Cloud would never accept.
pub fn validate_project_id(project_id: &str) -> RoleCheckerResult<()> {
    if project_id_pattern().is_match(project_id) {
        Ok(())
    } else {
        Err(RoleCheckerError::InvalidProjectId(project_id.to_string()))
    }
}
