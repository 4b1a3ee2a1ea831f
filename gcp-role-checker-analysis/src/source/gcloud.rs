//! gcloud CLI integration: policy and log reads via a `gcloud` subprocess.
//!
//! Authentication, account and impersonation settings are whatever the
//! invoking user's gcloud configuration says; this module only shells out
//! and maps the outcome.

use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};

use super::{LogSource, PolicySource};
use crate::error::{RoleCheckerError, RoleCheckerResult};
use crate::parsing::parse_policy;
use crate::types::IamPolicy;

pub const DEFAULT_GCLOUD_BINARY: &str = "gcloud";

/// Location of the gcloud executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcloudConfig {
    pub binary: PathBuf,
}

impl Default for GcloudConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_GCLOUD_BINARY),
        }
    }
}

impl GcloudConfig {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GcloudSource {
    config: GcloudConfig,
}

impl GcloudSource {
    pub fn new(config: GcloudConfig) -> Self {
        Self { config }
    }

    /// Run gcloud with `args` and return its stdout. Spawn failures and
    /// non-zero exits become [`RoleCheckerError::FetchFailed`] carrying stderr.
    fn run(&self, args: &[String]) -> RoleCheckerResult<String> {
        let mut command = Command::new(&self.config.binary);
        command.args(args);
        debug!("$ {}", format_command(&command));

        let output = command.output().map_err(|e| {
            RoleCheckerError::fetch_failed(format!(
                "Failed to run {}: {e}",
                self.config.binary.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RoleCheckerError::fetch_failed(format!(
                "{} failed with {}: {}",
                format_command(&command),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PolicySource for GcloudSource {
    fn fetch_iam_policy(&self, project_id: &str) -> RoleCheckerResult<IamPolicy> {
        info!("Fetching IAM policy for project {}", project_id);
        let stdout = self.run(&[
            "projects".to_string(),
            "get-iam-policy".to_string(),
            project_id.to_string(),
            "--format=json".to_string(),
        ])?;
        parse_policy(&stdout)
    }
}

impl LogSource for GcloudSource {
    fn read_log_entries(
        &self,
        project_id: &str,
        filter: &str,
    ) -> RoleCheckerResult<Vec<serde_json::Value>> {
        info!("Reading log entries for project {}", project_id);
        let stdout = self.run(&[
            "logging".to_string(),
            "read".to_string(),
            filter.to_string(),
            format!("--project={project_id}"),
            "--format=json".to_string(),
        ])?;
        let entries: Vec<serde_json::Value> = serde_json::from_str(&stdout).map_err(|e| {
            RoleCheckerError::invalid_log_entries(format!("Failed to parse log entries: {e}"))
        })?;
        debug!("Read {} log entries", entries.len());
        Ok(entries)
    }
}

/// Formats a command with its arguments for diagnostic output.
fn format_command(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned()),
    );
    parts.join(" ")
}
