//! This crate provides the core logic of the GCP role checker:
//! - IAM policy parsing and validation
//! - Service-account role classification (permanent vs conditional grants)
//! - Least-privilege rules and per-account role lookup
//! - Deterministic text rendering of the findings
//! - Used-services audit over Cloud Logging entries
//!

mod classification;
pub mod commands;
mod error;
mod parsing;
pub mod render;
mod rules;
pub mod source;
mod types;

// Re-exports for a small, focused public API
pub use classification::{classify, roles_for_account, Classification, ConditionalGrant, RoleHolders};
pub use commands::{analyze, collect_used_services, ProjectReport, RoleCheckerService, TimeWindow};
pub use error::{RoleCheckerError, RoleCheckerResult};
pub use parsing::{parse_policy, validate_project_id};
pub use render::{render, render_account_roles, render_report, render_service_account_user};
pub use rules::{admin_role, LeastPrivilegeRules, BASIC_ROLES, SERVICE_ACCOUNT_USER_ROLE};
pub use source::{FileSource, GcloudConfig, GcloudSource, LogSource, PolicySource};
pub use types::{Condition, IamPolicy, PrincipalRef, RoleBinding, SERVICE_ACCOUNT_PREFIX};
