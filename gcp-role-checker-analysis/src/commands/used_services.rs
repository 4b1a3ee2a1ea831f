//! Used-services audit: which Google APIs show up in a project's audit logs
//! over a time window.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;

use crate::error::{RoleCheckerError, RoleCheckerResult};
use crate::parsing::validate_project_id;
use crate::source::LogSource;

/// Inclusive UTC time window for a log query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> RoleCheckerResult<Self> {
        if start > end {
            return Err(RoleCheckerError::invalid_time_window(format!(
                "start {} is after end {}",
                start.to_rfc3339_opts(SecondsFormat::Secs, true),
                end.to_rfc3339_opts(SecondsFormat::Secs, true)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse RFC 3339 timestamps such as `2023-07-01T00:00:00Z`.
    pub fn parse(start: &str, end: &str) -> RoleCheckerResult<Self> {
        let parse = |value: &str| {
            DateTime::parse_from_rfc3339(value)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    RoleCheckerError::invalid_time_window(format!(
                        "'{value}' is not an RFC 3339 timestamp: {e}"
                    ))
                })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Cloud Logging filter selecting entries inside the window.
    pub fn filter(&self) -> String {
        format!(
            r#"timestamp>="{}" AND timestamp<="{}""#,
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// Distinct `protoPayload.serviceName` values across `entries`. Entries
/// without an audit payload or a service name are skipped.
pub fn collect_used_services(entries: &[serde_json::Value]) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .get("protoPayload")
                .and_then(|payload| payload.get("serviceName"))
                .and_then(serde_json::Value::as_str)
        })
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl<S: LogSource> super::service::RoleCheckerService<S> {
    /// Read the project's log entries inside `window` and collect the services in use.
    pub fn audit_used_services(
        &self,
        project_id: &str,
        window: &TimeWindow,
    ) -> RoleCheckerResult<BTreeSet<String>> {
        validate_project_id(project_id)?;
        let entries = self.source.read_log_entries(project_id, &window.filter())?;
        let services = collect_used_services(&entries);
        info!(
            "Found {} services across {} log entries",
            services.len(),
            entries.len()
        );
        Ok(services)
    }
}
