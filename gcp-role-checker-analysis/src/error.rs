//! Error types for role checker operations.

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or auditing a project's IAM data.
///
/// No-match outcomes are never errors: an empty classification or an empty
/// account lookup is a valid, reportable result.
#[derive(Error, Debug)]
pub enum RoleCheckerError {
    /// The source could not return a document (authentication, network, invalid project).
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The fetched document is structurally malformed.
    #[error("Invalid IAM policy: {0}")]
    InvalidPolicy(String),

    /// The logging source returned something other than a list of entries.
    #[error("Invalid log entries: {0}")]
    InvalidLogEntries(String),

    /// The project id was rejected before any fetch was attempted.
    #[error("Invalid project id '{0}'")]
    InvalidProjectId(String),

    /// The used-services window is empty or inverted.
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
}

/// Result alias used across the analysis crate.
pub type RoleCheckerResult<T> = Result<T, RoleCheckerError>;

impl RoleCheckerError {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed(message.into())
    }

    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy(message.into())
    }

    pub fn invalid_log_entries(message: impl Into<String>) -> Self {
        Self::InvalidLogEntries(message.into())
    }

    pub fn invalid_time_window(message: impl Into<String>) -> Self {
        Self::InvalidTimeWindow(message.into())
    }
}
