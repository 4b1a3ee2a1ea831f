//! Role Checker Service Layer
//!
//! The service owns a source and exposes the high-level operations (project
//! check, used-services audit) that the CLI binaries call.

/// Main service struct: holds the source every operation reads from.
pub struct RoleCheckerService<S> {
    pub(crate) source: S,
}

impl<S> RoleCheckerService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    // check_project() is implemented in check.rs
    // audit_used_services() is implemented in used_services.rs
}
