//! Authentication handling for the Jira REST API.
//!
//! Jira Cloud uses Basic Auth (username/email + API token). The token is
//! encoded into the `Authorization` header value at construction time and the
//! raw token is never retained or logged.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for Jira.
///
/// Holds the username and the pre-computed `Basic ...` authorization header.
/// Callers supply the credential at [`Connection`](crate::Connection)
/// construction time; the library never reads or persists it anywhere.
#[derive(Clone)]
pub struct Credential {
    /// The user's username or email address.
    username: String,
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl Credential {
    /// Create new credentials from a username and API token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    pub fn new(username: impl Into<String>, api_token: &str) -> Self {
        let username = username.into();
        let auth_header = build_auth_header(&username, api_token);
        Self {
            username,
            auth_header,
        }
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

// Manual Debug so the encoded credential never ends up in log output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("auth_header", &"<redacted>")
            .finish()
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "username:token" in Base64 and prepends "Basic ".
fn build_auth_header(username: &str, token: &str) -> String {
    let credentials = format!("{}:{}", username, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
