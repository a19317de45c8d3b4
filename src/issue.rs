//! Issue handles.
//!
//! An [`IssueHandle`] is a stateless binding to one remote issue: it caches
//! no issue data, holds no connection between calls, and every mutation is a
//! single authenticated round trip. A failed call leaves the handle usable;
//! errors are per-call.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Method};
use serde_json::json;
use tracing::{debug, instrument};

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::request::{self, ATLASSIAN_TOKEN_HEADER, ATLASSIAN_TOKEN_NO_CHECK};
use crate::types::{update_body, CommentBody, UpdateVerb};

/// A handle to one remote issue.
///
/// Carries its own copies of the root URL and credential (not a
/// back-reference to the [`Connection`](crate::Connection) that issued it),
/// so it stays valid however the connection is reconfigured afterwards.
#[derive(Debug, Clone)]
pub struct IssueHandle {
    /// The HTTP client.
    client: Client,
    /// The root URL of the Jira instance.
    root_url: String,
    /// Authentication credentials.
    credential: Credential,
    /// The issue's numeric id or project-scoped key.
    identifier: String,
}

impl IssueHandle {
    pub(crate) fn new(
        client: Client,
        root_url: String,
        credential: Credential,
        identifier: String,
    ) -> Self {
        debug_assert!(!identifier.is_empty(), "issue identifier must not be empty");
        Self {
            client,
            root_url,
            credential,
            identifier,
        }
    }

    /// The issue's identifier (numeric id or key such as "SIT-7").
    pub fn id(&self) -> &str {
        &self.identifier
    }

    /// The root URL this handle was issued with.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Update the summary field.
    #[instrument(skip(self, summary), fields(issue = %self.identifier))]
    pub async fn update_summary(&self, summary: &str) -> Result<()> {
        self.apply_update("summary", UpdateVerb::Set, json!(summary))
            .await
    }

    /// Update the description field.
    #[instrument(skip(self, description), fields(issue = %self.identifier))]
    pub async fn update_description(&self, description: &str) -> Result<()> {
        self.apply_update("description", UpdateVerb::Set, json!(description))
            .await
    }

    /// Update the environment field.
    #[instrument(skip(self, environment), fields(issue = %self.identifier))]
    pub async fn update_environment(&self, environment: &str) -> Result<()> {
        self.apply_update("environment", UpdateVerb::Set, json!(environment))
            .await
    }

    /// Update the priority to the given priority id.
    #[instrument(skip(self), fields(issue = %self.identifier))]
    pub async fn update_priority(&self, priority_id: u32) -> Result<()> {
        // Jira expects the id as a string inside the set action
        self.apply_update(
            "priority",
            UpdateVerb::Set,
            json!({"id": priority_id.to_string()}),
        )
        .await
    }

    /// Add a label.
    #[instrument(skip(self), fields(issue = %self.identifier))]
    pub async fn add_label(&self, label: &str) -> Result<()> {
        self.apply_update("labels", UpdateVerb::Add, json!(label))
            .await
    }

    /// Remove a label.
    #[instrument(skip(self), fields(issue = %self.identifier))]
    pub async fn remove_label(&self, label: &str) -> Result<()> {
        self.apply_update("labels", UpdateVerb::Remove, json!(label))
            .await
    }

    /// Post a comment on the issue.
    ///
    /// Sends `POST /rest/api/2/issue/{id}/comment` with `{"body": …}` and
    /// the `X-Atlassian-Token: no-check` header.
    #[instrument(skip(self, comment), fields(issue = %self.identifier))]
    pub async fn add_comment(&self, comment: &str) -> Result<()> {
        let url = request::issue_url(&self.root_url, &self.identifier, Some("comment"));
        request::send_json(
            &self.client,
            Method::POST,
            &url,
            &self.credential,
            &CommentBody { body: comment },
            &[(ATLASSIAN_TOKEN_HEADER, ATLASSIAN_TOKEN_NO_CHECK)],
        )
        .await?;
        Ok(())
    }

    /// Attach a file to the issue.
    ///
    /// Reads the file within the scope of this call, then sends `POST
    /// /rest/api/2/issue/{id}/attachments` as multipart/form-data with one
    /// part named `file` carrying the bytes and the file name. The service's
    /// attachment metadata response is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentIo`] if the file cannot be read or has no
    /// file name, in addition to the usual transport and remote errors.
    #[instrument(skip(self), fields(issue = %self.identifier))]
    pub async fn attach_file(&self, path: impl AsRef<Path> + std::fmt::Debug) -> Result<()> {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| Error::AttachmentIo {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ),
            })?;

        let bytes = tokio::fs::read(path).await.map_err(|source| Error::AttachmentIo {
            path: path.to_path_buf(),
            source,
        })?;

        self.attach_bytes(&file_name, bytes).await
    }

    /// Attach in-memory bytes to the issue under the given file name.
    ///
    /// Same request as [`attach_file`](IssueHandle::attach_file) for callers
    /// that already hold the content.
    #[instrument(skip(self, bytes), fields(issue = %self.identifier, file = %file_name))]
    pub async fn attach_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let url = request::issue_url(&self.root_url, &self.identifier, Some("attachments"));
        debug!(url = %url, size = bytes.len(), "Uploading attachment");

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        // No JSON content type here: the multipart boundary supplies it.
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.credential.header_value())
            .header(ATLASSIAN_TOKEN_HEADER, ATLASSIAN_TOKEN_NO_CHECK)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        request::ensure_success(response).await?;
        Ok(())
    }

    /// Send one field-update action against the issue endpoint.
    async fn apply_update(
        &self,
        field: &str,
        verb: UpdateVerb,
        value: serde_json::Value,
    ) -> Result<()> {
        let url = request::issue_url(&self.root_url, &self.identifier, None);
        let body = update_body(field, verb, value);

        request::send_json(
            &self.client,
            Method::PUT,
            &url,
            &self.credential,
            &body,
            &[],
        )
        .await?;
        Ok(())
    }
}
