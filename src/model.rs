use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
    /// Size in kilobytes as reported by GitHub.
    pub size: u64,
    pub fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitRef {
    pub sha: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    pub commits: Vec<CommitRef>,
}

impl PushPayload {
    pub fn with_commits(count: usize) -> Self {
        Self { commits: vec![CommitRef::default(); count] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRef {
    pub merged: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestPayload {
    pub action: Option<String>,
    pub pull_request: Option<PullRequestRef>,
}

impl PullRequestPayload {
    pub fn action(action: &str) -> Self {
        Self { action: Some(action.to_string()), pull_request: None }
    }

    pub fn is_merged(&self) -> bool {
        self.action.as_deref() == Some("closed")
            && self.pull_request.as_ref().and_then(|pr| pr.merged).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuesPayload {
    pub action: Option<String>,
}

impl IssuesPayload {
    pub fn action(action: &str) -> Self {
        Self { action: Some(action.to_string()) }
    }
}

/// Event types the pipeline distinguishes. Anything else keeps its raw type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push(PushPayload),
    PullRequest(PullRequestPayload),
    Issues(IssuesPayload),
    PullRequestReview,
    IssueComment,
    PullRequestReviewComment,
    CommitComment,
    Other(String),
}

impl EventKind {
    pub fn type_name(&self) -> &str {
        match self {
            EventKind::Push(_) => "PushEvent",
            EventKind::PullRequest(_) => "PullRequestEvent",
            EventKind::Issues(_) => "IssuesEvent",
            EventKind::PullRequestReview => "PullRequestReviewEvent",
            EventKind::IssueComment => "IssueCommentEvent",
            EventKind::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            EventKind::CommitComment => "CommitCommentEvent",
            EventKind::Other(name) => name,
        }
    }

    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            EventKind::IssueComment | EventKind::PullRequestReviewComment | EventKind::CommitComment
        )
    }
}

/// A public GitHub event. Payloads that do not match the expected shape fall
/// back to their empty defaults instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEvent", into = "RawEvent")]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
    pub repo: RepoRef,
}

impl Event {
    pub fn new(kind: EventKind, created_at: DateTime<Utc>, repo: &str) -> Self {
        Self {
            id: String::new(),
            kind,
            created_at,
            repo: RepoRef { name: repo.to_string() },
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    repo: RepoRef,
    #[serde(default)]
    payload: serde_json::Value,
}

fn payload_or_default<T: DeserializeOwned + Default>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let kind = match raw.kind.as_str() {
            "PushEvent" => EventKind::Push(payload_or_default(raw.payload)),
            "PullRequestEvent" => EventKind::PullRequest(payload_or_default(raw.payload)),
            "IssuesEvent" => EventKind::Issues(payload_or_default(raw.payload)),
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            "IssueCommentEvent" => EventKind::IssueComment,
            "PullRequestReviewCommentEvent" => EventKind::PullRequestReviewComment,
            "CommitCommentEvent" => EventKind::CommitComment,
            _ => EventKind::Other(raw.kind),
        };
        Self { id: raw.id, kind, created_at: raw.created_at, repo: raw.repo }
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let kind = event.kind.type_name().to_string();
        let payload = match event.kind {
            EventKind::Push(p) => serde_json::to_value(p),
            EventKind::PullRequest(p) => serde_json::to_value(p),
            EventKind::Issues(p) => serde_json::to_value(p),
            _ => Ok(serde_json::Value::Null),
        }
        .unwrap_or(serde_json::Value::Null);
        Self { id: event.id, kind, created_at: event.created_at, repo: event.repo, payload }
    }
}

/// Everything fetched for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user: UserProfile,
    pub repos: Vec<Repository>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBucket {
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub reviews: u64,
}

impl ContributionBucket {
    pub fn total(&self) -> u64 {
        self.commits + self.pull_requests + self.issues + self.reviews
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotals {
    pub count: u64,
    pub stars: u64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: u64,
    pub stars: u64,
    pub size: u64,
    pub percentage: f64,
    pub popularity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub top_languages: Vec<LanguageStat>,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub increasing: bool,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub date: String,
    pub total: u64,
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub reviews: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub totals: ContributionBucket,
    pub trend: Trend,
    pub heatmap: Vec<HeatmapDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_watchers: u64,
    pub repo_count: u64,
    pub languages: LanguageSummary,
    pub activity: ActivitySummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    pub month: String,
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub granularity: String,
    pub buckets: Vec<HeatmapDay>,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: String,
    pub period: String,
    pub since: DateTime<Utc>,
    pub months: Vec<MonthlyActivity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_payloads_are_typed() {
        let push: Event = serde_json::from_value(json!({
            "id": "1",
            "type": "PushEvent",
            "created_at": "2024-01-01T10:00:00Z",
            "repo": { "name": "octo/hello" },
            "payload": { "commits": [{ "sha": "a", "message": "x" }, { "sha": "b" }] }
        }))
        .unwrap();
        assert_eq!(push.kind, EventKind::Push(PushPayload {
            commits: vec![
                CommitRef { sha: "a".into(), message: "x".into() },
                CommitRef { sha: "b".into(), message: String::new() },
            ]
        }));
        assert_eq!(push.repo.name, "octo/hello");

        let merged: Event = serde_json::from_value(json!({
            "type": "PullRequestEvent",
            "created_at": "2024-01-02T10:00:00Z",
            "payload": { "action": "closed", "pull_request": { "merged": true } }
        }))
        .unwrap();
        match merged.kind {
            EventKind::PullRequest(ref p) => assert!(p.is_merged()),
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_types_and_broken_payloads_default() {
        let watch: Event = serde_json::from_value(json!({
            "type": "WatchEvent",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(watch.kind, EventKind::Other("WatchEvent".into()));

        let broken: Event = serde_json::from_value(json!({
            "type": "PushEvent",
            "created_at": "2024-01-01T00:00:00Z",
            "payload": { "commits": "not a list" }
        }))
        .unwrap();
        assert_eq!(broken.kind, EventKind::Push(PushPayload::default()));
    }

    #[test]
    fn event_serialization_keeps_shape() {
        let event = Event::new(
            EventKind::Issues(IssuesPayload::action("opened")),
            "2024-03-04T05:06:07Z".parse().unwrap(),
            "octo/repo",
        );
        let text = serde_json::to_string(&event).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "IssuesEvent");
        assert_eq!(value["payload"]["action"], "opened");
        let back: Event = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn repository_missing_fields_default() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "tiny",
            "language": null,
            "stargazers_count": 3
        }))
        .unwrap();
        assert_eq!(repo.name, "tiny");
        assert_eq!(repo.language, None);
        assert_eq!(repo.stargazers_count, 3);
        assert!(repo.topics.is_empty());
        assert!(!repo.has_wiki);
    }
}
