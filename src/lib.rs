//! JiraLink - an async client library for the Jira REST API
//!
//! The crate is built around two types: a [`Connection`], which owns the
//! service root URL and credential and creates issues, and an
//! [`IssueHandle`], which targets one remote issue and exposes one method
//! per mutable field or relationship. Every operation is a single
//! authenticated round trip; there is no retry, caching, or batching layer.
//!
//! ```no_run
//! use jiralink::{Connection, CreateOptions, Credential};
//!
//! # async fn run() -> jiralink::Result<()> {
//! let credential = Credential::new("user@example.com", "api-token");
//! let conn = Connection::new("https://company.atlassian.net", credential)?;
//!
//! let issue = conn
//!     .create_issue("SIT", "Bug", "Checkout page crashes", CreateOptions::new())
//!     .await?;
//!
//! issue.update_priority(2).await?;
//! issue.add_label("regression").await?;
//! issue.add_comment("Seen on staging as well.").await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod connection;
mod error;
mod issue;
mod reporter;
mod request;
mod types;

pub use auth::Credential;
pub use connection::Connection;
pub use error::{Error, Result};
pub use issue::IssueHandle;
pub use reporter::{FailureReport, IssueReporter};
pub use types::{CreateOptions, IssueType};
