//! Request and response payloads for the Jira REST API v2.
//!
//! These types model exactly the JSON shapes the service expects: the
//! issue-creation body and the partial-update convention
//! `{"update": {field: [{verb: value}]}}`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// The type of an issue, selected either by human-readable name or by
/// numeric id.
///
/// Jira accepts both inside the `issuetype` object, under different keys
/// (`name` vs `id`); the id is rendered as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueType {
    /// Select by name, e.g. "Bug" or "Task".
    Name(String),
    /// Select by numeric issue type id, e.g. 10004.
    Id(u64),
}

impl Serialize for IssueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            IssueType::Name(name) => map.serialize_entry("name", name)?,
            // Jira expects the id as a string, not a number
            IssueType::Id(id) => map.serialize_entry("id", &id.to_string())?,
        }
        map.end()
    }
}

impl From<&str> for IssueType {
    fn from(name: &str) -> Self {
        IssueType::Name(name.to_string())
    }
}

impl From<String> for IssueType {
    fn from(name: String) -> Self {
        IssueType::Name(name)
    }
}

impl From<u64> for IssueType {
    fn from(id: u64) -> Self {
        IssueType::Id(id)
    }
}

/// Optional fields for issue creation.
///
/// Defaults to neither a description nor a priority, matching the minimal
/// create payload.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// The issue description, if any.
    pub description: Option<String>,
    /// The priority id, if any.
    pub priority_id: Option<u32>,
}

impl CreateOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issue description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority id.
    pub fn priority(mut self, priority_id: u32) -> Self {
        self.priority_id = Some(priority_id);
        self
    }
}

/// A project reference inside a create payload.
#[derive(Debug, Serialize)]
pub(crate) struct ProjectKey<'a> {
    pub key: &'a str,
}

/// A priority reference; Jira expects the id as a string.
#[derive(Debug, Serialize)]
pub(crate) struct PriorityId {
    pub id: String,
}

/// The `fields` object of an issue-creation request.
#[derive(Debug, Serialize)]
pub(crate) struct IssueFields<'a> {
    pub project: ProjectKey<'a>,
    pub summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub issuetype: &'a IssueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityId>,
}

/// The full body of `POST /rest/api/2/issue`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueBody<'a> {
    pub fields: IssueFields<'a>,
}

impl<'a> CreateIssueBody<'a> {
    pub fn new(
        project_key: &'a str,
        issue_type: &'a IssueType,
        summary: &'a str,
        options: &'a CreateOptions,
    ) -> Self {
        Self {
            fields: IssueFields {
                project: ProjectKey { key: project_key },
                summary,
                description: options.description.as_deref(),
                issuetype: issue_type,
                priority: options.priority_id.map(|id| PriorityId { id: id.to_string() }),
            },
        }
    }
}

/// The minimal creation response: Jira answers with at least `id`, `key`
/// and `self`; only the id is needed to bind a handle.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedIssue {
    pub id: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub key: Option<String>,
}

/// The verb of a field-update action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateVerb {
    Set,
    Add,
    Remove,
}

impl UpdateVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateVerb::Set => "set",
            UpdateVerb::Add => "add",
            UpdateVerb::Remove => "remove",
        }
    }
}

/// Build a partial-update body in Jira's actions convention:
/// `{"update": {field: [{verb: value}]}}`.
pub(crate) fn update_body(field: &str, verb: UpdateVerb, value: Value) -> Value {
    let mut action = Map::new();
    action.insert(verb.as_str().to_string(), value);

    let mut fields = Map::new();
    fields.insert(field.to_string(), Value::Array(vec![Value::Object(action)]));

    let mut body = Map::new();
    body.insert("update".to_string(), Value::Object(fields));
    Value::Object(body)
}

/// The body of `POST /rest/api/2/issue/{id}/comment`.
#[derive(Debug, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub body: &'a str,
}
