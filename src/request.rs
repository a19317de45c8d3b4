//! Shared request machinery.
//!
//! Connection and IssueHandle both build their requests here: URL
//! construction, the authenticated JSON send, and explicit status checking.
//! Every call is a single round trip; there is no retry and no queueing.

use std::time::Duration;

use reqwest::{header, Client, Method, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::Credential;
use crate::error::{Error, Result};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header Jira requires on comment and attachment posts to bypass XSRF
/// checks for non-browser clients.
pub(crate) const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

/// Value for [`ATLASSIAN_TOKEN_HEADER`].
pub(crate) const ATLASSIAN_TOKEN_NO_CHECK: &str = "no-check";

/// Build the HTTP client with appropriate settings.
pub(crate) fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(Error::Transport)
}

/// Normalize the root URL by removing trailing slashes.
///
/// Warns if not HTTPS (but doesn't enforce, for localhost/testing).
pub(crate) fn normalize_root_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

/// The issue-creation endpoint: `<root>/rest/api/2/issue`.
pub(crate) fn create_issue_url(root_url: &str) -> String {
    format!("{}/rest/api/2/issue", root_url)
}

/// An issue endpoint: `<root>/rest/api/2/issue/<id>`, optionally with a
/// sub-resource such as `comment` or `attachments` appended.
pub(crate) fn issue_url(root_url: &str, identifier: &str, sub_resource: Option<&str>) -> String {
    match sub_resource {
        Some(sub) => format!("{}/rest/api/2/issue/{}/{}", root_url, identifier, sub),
        None => format!("{}/rest/api/2/issue/{}", root_url, identifier),
    }
}

/// Send an authenticated JSON request and check its status.
///
/// Attaches the Basic authorization header and `Content-Type:
/// application/json`. Pre-response failures surface as
/// [`Error::Transport`]; non-2xx statuses as [`Error::Remote`].
pub(crate) async fn send_json<B: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    credential: &Credential,
    body: &B,
    extra_headers: &[(&str, &str)],
) -> Result<Response> {
    debug!(method = %method, url = %url, "Sending request");

    let mut request = client
        .request(method, url)
        .header(header::AUTHORIZATION, credential.header_value())
        .header(header::CONTENT_TYPE, "application/json")
        .json(body);

    for (name, value) in extra_headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await.map_err(Error::Transport)?;
    ensure_success(response).await
}

/// Check the HTTP status, turning any non-2xx answer into [`Error::Remote`]
/// carrying the status code and the error body.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = %status, "Error response body: {}", body);

    Err(Error::Remote {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root_url_removes_trailing_slash() {
        assert_eq!(
            normalize_root_url("https://company.atlassian.net/"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_root_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_root_url("https://company.atlassian.net///"),
            "https://company.atlassian.net"
        );
    }

    #[test]
    fn test_normalize_root_url_preserves_path() {
        assert_eq!(
            normalize_root_url("https://company.atlassian.net/jira/"),
            "https://company.atlassian.net/jira"
        );
    }

    #[test]
    fn test_create_issue_url() {
        assert_eq!(
            create_issue_url("https://company.atlassian.net"),
            "https://company.atlassian.net/rest/api/2/issue"
        );
    }

    #[test]
    fn test_issue_url_without_sub_resource() {
        assert_eq!(
            issue_url("https://company.atlassian.net", "SIT-7", None),
            "https://company.atlassian.net/rest/api/2/issue/SIT-7"
        );
    }

    #[test]
    fn test_issue_url_with_sub_resource() {
        assert_eq!(
            issue_url("https://company.atlassian.net", "10042", Some("comment")),
            "https://company.atlassian.net/rest/api/2/issue/10042/comment"
        );
        assert_eq!(
            issue_url("https://company.atlassian.net", "10042", Some("attachments")),
            "https://company.atlassian.net/rest/api/2/issue/10042/attachments"
        );
    }
}
