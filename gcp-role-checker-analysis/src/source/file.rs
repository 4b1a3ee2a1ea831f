//! Policy source backed by an exported policy document on disk, e.g. the
//! saved output of `gcloud projects get-iam-policy <id> --format=json`.

use std::path::{Path, PathBuf};

use log::{debug, info};

use super::PolicySource;
use crate::error::{RoleCheckerError, RoleCheckerResult};
use crate::parsing::parse_policy;
use crate::types::IamPolicy;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolicySource for FileSource {
    fn fetch_iam_policy(&self, project_id: &str) -> RoleCheckerResult<IamPolicy> {
        info!(
            "Reading IAM policy for {} from {}",
            project_id,
            self.path.display()
        );
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            RoleCheckerError::fetch_failed(format!(
                "Failed to read policy file {}: {e}",
                self.path.display()
            ))
        })?;
        debug!("Read {} bytes of policy JSON", content.len());
        parse_policy(&content)
    }
}
