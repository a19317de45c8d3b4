//! Demo: file an issue, mutate its fields, and post a comment.
//!
//! Credentials come from the environment, never from the source:
//!
//! ```sh
//! export JIRA_URL=https://company.atlassian.net
//! export JIRA_USER=user@example.com
//! export JIRA_TOKEN=<api token>
//! cargo run --example report_failure
//! ```

use jiralink::{Connection, CreateOptions, Credential, FailureReport, IssueReporter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jiralink=debug")),
        )
        .init();

    let root_url = std::env::var("JIRA_URL")?;
    let username = std::env::var("JIRA_USER")?;
    let api_token = std::env::var("JIRA_TOKEN")?;
    let project_key = std::env::var("JIRA_PROJECT").unwrap_or_else(|_| "SIT".to_string());

    let conn = Connection::new(&root_url, Credential::new(username, &api_token))?;

    // Create an issue the way a test-failure hook would
    let reporter = IssueReporter::new(conn.clone(), &project_key);
    let issue = reporter
        .report(FailureReport::new(
            "checkout_test failed due to an exception",
            "Exception details: timed out waiting for #pay-button",
        ))
        .await?;

    println!("Created issue {}", issue.id());

    // Exercise a few field mutations on the fresh handle
    issue.update_environment("staging, Firefox 129").await?;
    issue.update_priority(2).await?;
    issue.add_label("automated-report").await?;
    issue.add_comment("Filed automatically by the test suite.").await?;

    // Creating directly also works, without the reporter wrapper
    let other = conn
        .create_issue(
            &project_key,
            "Task",
            "Triage automated bug reports",
            CreateOptions::new().description("Weekly sweep of reporter-filed issues."),
        )
        .await?;

    println!("Created follow-up task {}", other.id());
    Ok(())
}
