//! Policy and log sources
//!
//! The analysis never talks to Google Cloud directly; it asks a source for
//! the project's IAM policy or log entries. Any source failure is terminal
//! for the invocation and is reported as a single error.

mod file;
mod gcloud;

pub use file::FileSource;
pub use gcloud::{GcloudConfig, GcloudSource, DEFAULT_GCLOUD_BINARY};

use crate::error::RoleCheckerResult;
use crate::types::IamPolicy;

/// Supplies the IAM policy of a project.
pub trait PolicySource {
    fn fetch_iam_policy(&self, project_id: &str) -> RoleCheckerResult<IamPolicy>;
}

/// Supplies raw Cloud Logging entries of a project matching a logging filter.
pub trait LogSource {
    fn read_log_entries(
        &self,
        project_id: &str,
        filter: &str,
    ) -> RoleCheckerResult<Vec<serde_json::Value>>;
}
