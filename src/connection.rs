//! The Jira connection.
//!
//! A [`Connection`] owns the service root URL and the credential, creates
//! issues, and binds identifiers the caller already knows to
//! [`IssueHandle`]s. Each operation is one authenticated round trip; no
//! network resource is held between calls.

use reqwest::{Client, Method};
use tracing::{debug, info, instrument};

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::issue::IssueHandle;
use crate::request;
use crate::types::{CreateIssueBody, CreateOptions, CreatedIssue, IssueType};

/// A connection to a Jira instance.
///
/// Immutable after construction except through [`set_credential`] and
/// [`set_root_url`]; reconfiguration affects subsequent calls only and has
/// no effect on already-issued handles, which carry their own copies.
///
/// [`set_credential`]: Connection::set_credential
/// [`set_root_url`]: Connection::set_root_url
#[derive(Debug, Clone)]
pub struct Connection {
    /// The HTTP client.
    client: Client,
    /// The root URL of the Jira instance.
    root_url: String,
    /// Authentication credentials.
    credential: Credential,
}

impl Connection {
    /// Create a new connection.
    ///
    /// Performs no network call; the credentials are only exercised on the
    /// first request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the root URL is empty, or
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(root_url: &str, credential: Credential) -> Result<Self> {
        if root_url.trim().is_empty() {
            return Err(Error::Configuration(
                "root URL must not be empty".to_string(),
            ));
        }

        let client = request::build_http_client()?;
        let root_url = request::normalize_root_url(root_url);

        Ok(Self {
            client,
            root_url,
            credential,
        })
    }

    /// Create a new connection from explicit credentials.
    ///
    /// Shorthand for building a [`Credential`] and calling
    /// [`Connection::new`].
    pub fn with_credentials(root_url: &str, username: &str, api_token: &str) -> Result<Self> {
        Self::new(root_url, Credential::new(username, api_token))
    }

    /// Replace the credential used for subsequent requests.
    ///
    /// Handles issued before this call keep the old credential.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    /// Replace the root URL used for subsequent requests.
    ///
    /// Handles issued before this call keep the old URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the URL is empty.
    pub fn set_root_url(&mut self, root_url: &str) -> Result<()> {
        if root_url.trim().is_empty() {
            return Err(Error::Configuration(
                "root URL must not be empty".to_string(),
            ));
        }
        self.root_url = request::normalize_root_url(root_url);
        Ok(())
    }

    /// Get the root URL.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Create an issue and return a handle bound to its id.
    ///
    /// Sends `POST /rest/api/2/issue` with the payload
    /// `{"fields": {"project": {"key": …}, "summary": …, "issuetype": …,
    /// ["description": …], ["priority": {"id": …}]}}`. The issue type is
    /// selected by name or by id via [`IssueType`]; optional fields come
    /// from [`CreateOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on network failure, [`Error::Remote`]
    /// on a non-2xx status, and [`Error::MalformedResponse`] if the success
    /// body lacks an `id` field. A failed creation never returns a handle,
    /// and the call is not retried.
    #[instrument(skip(self, options), fields(project_key = %project_key))]
    pub async fn create_issue(
        &self,
        project_key: &str,
        issue_type: impl Into<IssueType> + std::fmt::Debug,
        summary: &str,
        options: CreateOptions,
    ) -> Result<IssueHandle> {
        let issue_type = issue_type.into();
        let body = CreateIssueBody::new(project_key, &issue_type, summary, &options);
        let url = request::create_issue_url(&self.root_url);

        let response = request::send_json(
            &self.client,
            Method::POST,
            &url,
            &self.credential,
            &body,
            &[],
        )
        .await?;

        let created: CreatedIssue = response.json().await.map_err(|e| {
            Error::MalformedResponse(format!("create response missing issue id: {}", e))
        })?;

        info!(issue_id = %created.id, "Created issue");
        Ok(self.issue(created.id))
    }

    /// Bind a handle to an issue the caller already knows.
    ///
    /// This is purely local: the identifier (numeric id or project-scoped
    /// key such as "SIT-7") is not validated against the service, so a
    /// nonexistent issue only surfaces on the handle's first use.
    pub fn issue(&self, identifier: impl Into<String>) -> IssueHandle {
        let identifier = identifier.into();
        debug!(identifier = %identifier, "Binding issue handle");
        IssueHandle::new(
            self.client.clone(),
            self.root_url.clone(),
            self.credential.clone(),
            identifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("user@example.com", "token")
    }

    #[test]
    fn test_new_rejects_empty_root_url() {
        let result = Connection::new("", credential());
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = Connection::new("   ", credential());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_new_normalizes_root_url() {
        let conn = Connection::new("https://company.atlassian.net/", credential()).unwrap();
        assert_eq!(conn.root_url(), "https://company.atlassian.net");
    }

    #[test]
    fn test_set_root_url_rejects_empty() {
        let mut conn = Connection::new("https://company.atlassian.net", credential()).unwrap();
        assert!(conn.set_root_url("").is_err());
        // The old URL survives a rejected update
        assert_eq!(conn.root_url(), "https://company.atlassian.net");
    }

    #[test]
    fn test_set_root_url_replaces_url() {
        let mut conn = Connection::new("https://one.atlassian.net", credential()).unwrap();
        conn.set_root_url("https://two.atlassian.net/").unwrap();
        assert_eq!(conn.root_url(), "https://two.atlassian.net");
    }

    #[test]
    fn test_issue_binds_identifier_without_network() {
        let conn = Connection::new("https://company.atlassian.net", credential()).unwrap();
        let handle = conn.issue("SIT-7");
        assert_eq!(handle.id(), "SIT-7");

        let handle = conn.issue("10042");
        assert_eq!(handle.id(), "10042");
    }

    #[test]
    fn test_handles_keep_their_own_configuration() {
        let mut conn = Connection::new("https://one.atlassian.net", credential()).unwrap();
        let handle = conn.issue("SIT-7");

        conn.set_root_url("https://two.atlassian.net").unwrap();
        conn.set_credential(Credential::new("other@example.com", "other"));

        // The handle still points at the URL it was issued with
        assert_eq!(handle.root_url(), "https://one.atlassian.net");
    }
}
