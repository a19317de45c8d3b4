//! Test-failure reporting.
//!
//! Test-automation layers often want to file an issue when a test flagged as
//! production-ready fails. This module is the whole contract they need: hand
//! an [`IssueReporter`] a summary and description, get back a handle or a
//! surfaced error. Nothing here knows about any test framework.

use tracing::{info, instrument};

use crate::connection::Connection;
use crate::error::Result;
use crate::issue::IssueHandle;
use crate::types::{CreateOptions, IssueType};

/// A failure observed by an automation layer.
#[derive(Debug, Clone)]
pub struct FailureReport {
    /// Short summary, typically the failed test's name.
    pub summary: String,
    /// Longer description, typically the exception message and stack trace.
    pub description: String,
}

impl FailureReport {
    /// Create a report from a summary and description.
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
        }
    }
}

/// Files issues for failure reports against a fixed project.
///
/// Wraps [`Connection::create_issue`]; issues are created as "Bug" unless
/// another type is configured.
#[derive(Debug, Clone)]
pub struct IssueReporter {
    connection: Connection,
    project_key: String,
    issue_type: IssueType,
}

impl IssueReporter {
    /// Create a reporter that files bugs under the given project.
    pub fn new(connection: Connection, project_key: impl Into<String>) -> Self {
        Self {
            connection,
            project_key: project_key.into(),
            issue_type: IssueType::Name("Bug".to_string()),
        }
    }

    /// Use a different issue type for filed reports.
    pub fn with_issue_type(mut self, issue_type: impl Into<IssueType>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// File an issue for the given failure.
    ///
    /// # Errors
    ///
    /// Surfaces whatever [`Connection::create_issue`] surfaces; a failed
    /// report never yields a handle.
    #[instrument(skip(self, report), fields(project_key = %self.project_key))]
    pub async fn report(&self, report: FailureReport) -> Result<IssueHandle> {
        let handle = self
            .connection
            .create_issue(
                &self.project_key,
                self.issue_type.clone(),
                &report.summary,
                CreateOptions::new().description(report.description),
            )
            .await?;

        info!(issue_id = %handle.id(), "Filed failure report");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;

    #[test]
    fn test_failure_report_new() {
        let report = FailureReport::new("test_login failed", "Exception details: timeout");
        assert_eq!(report.summary, "test_login failed");
        assert_eq!(report.description, "Exception details: timeout");
    }

    #[test]
    fn test_reporter_defaults_to_bug() {
        let conn = Connection::new(
            "https://company.atlassian.net",
            Credential::new("user@example.com", "token"),
        )
        .unwrap();

        let reporter = IssueReporter::new(conn, "SIT");
        assert_eq!(reporter.issue_type, IssueType::Name("Bug".to_string()));
    }

    #[test]
    fn test_reporter_with_issue_type() {
        let conn = Connection::new(
            "https://company.atlassian.net",
            Credential::new("user@example.com", "token"),
        )
        .unwrap();

        let reporter = IssueReporter::new(conn, "SIT").with_issue_type(10004);
        assert_eq!(reporter.issue_type, IssueType::Id(10004));
    }
}
