//! End-to-end test for the test-failure reporting hook.

use jiralink::{Connection, Credential, Error, FailureReport, IssueReporter};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn report_files_a_bug_with_summary_and_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .and(body_json(serde_json::json!({
            "fields": {
                "project": {"key": "SIT"},
                "summary": "test_checkout failed due to an exception",
                "description": "Exception details: element not found",
                "issuetype": {"name": "Bug"}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "10099",
            "key": "SIT-12"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let conn = Connection::new(&server.uri(), Credential::new("ci@example.com", "token")).unwrap();
    let reporter = IssueReporter::new(conn, "SIT");

    let handle = reporter
        .report(FailureReport::new(
            "test_checkout failed due to an exception",
            "Exception details: element not found",
        ))
        .await
        .unwrap();

    // The returned handle is immediately usable for follow-up mutation
    assert_eq!(handle.id(), "10099");
}

#[tokio::test]
async fn report_surfaces_creation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let conn = Connection::new(&server.uri(), Credential::new("ci@example.com", "bad")).unwrap();
    let reporter = IssueReporter::new(conn, "SIT");

    let result = reporter
        .report(FailureReport::new("test failed", "details"))
        .await;

    match result {
        Err(Error::Remote { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected Remote error, got {:?}", other.map(|h| h.id().to_string())),
    }
}
