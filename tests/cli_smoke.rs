use assert_cmd::prelude::*;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_user(server: &MockServer, login: &str, stars: u64, followers: u64) {
    let recent = (Utc::now() - Duration::days(3)).to_rfc3339();

    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": login,
            "followers": followers,
            "following": 2,
            "public_repos": 1
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": format!("{login}-lib"),
            "language": "Rust",
            "stargazers_count": stars,
            "forks_count": 1,
            "topics": ["cli"],
            "created_at": "2021-01-01T00:00:00Z",
            "updated_at": recent,
            "pushed_at": recent
        }])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}/events")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "type": "PushEvent", "created_at": recent,
              "repo": { "name": format!("{login}/{login}-lib") },
              "payload": { "commits": [{ "sha": "a" }, { "sha": "b" }] } },
            { "id": "2", "type": "IssuesEvent", "created_at": recent,
              "repo": { "name": format!("{login}/{login}-lib") },
              "payload": { "action": "reopened" } }
        ])))
        .mount(server)
        .await;
}

fn ghstats(server: &MockServer, workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ghstats").unwrap();
    cmd.current_dir(workdir)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHSTATS_CACHE_TTL")
        .env("GITHUB_API_URL", server.uri())
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn stats_json_has_versioned_envelope() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", 12, 40).await;
    let dir = tempdir().unwrap();

    let output = ghstats(&server, dir.path())
        .args(["--token", "t", "stats", "--json", "octocat"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let body = stdout_json(&output);
    assert_eq!(body["version"], 1);
    assert_eq!(body["username"], "octocat");
    assert_eq!(body["stats"]["total_stars"], 12);
    assert_eq!(body["stats"]["languages"]["top_languages"][0]["name"], "Rust");
    assert_eq!(body["contributions"]["contribution_streak"], 1);
    assert_eq!(body["main_technologies"][0], "Rust");
}

#[tokio::test(flavor = "multi_thread")]
async fn token_is_read_from_dotenv_file() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", 1, 1).await;
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "GITHUB_TOKEN=from-dotenv\n").unwrap();

    ghstats(&server, dir.path())
        .args(["heat", "--ndjson", "octocat"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    ghstats(&server, dir.path()).args(["stats", "octocat"]).assert().failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let output = ghstats(&server, dir.path())
        .args(["--token", "t", "stats", "--json", "nobody"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'nobody' was not found"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn activity_counts_reopened_issues() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat", 1, 1).await;
    let dir = tempdir().unwrap();

    let output = ghstats(&server, dir.path())
        .args(["--token", "t", "activity", "--period", "6m", "--json", "octocat"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let body = stdout_json(&output);
    assert_eq!(body["period"], "6m");
    let months = body["months"].as_array().unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0]["commits"], 2);
    assert_eq!(months[0]["issues"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn activity_rejects_unknown_period() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let output = ghstats(&server, dir.path())
        .args(["--token", "t", "activity", "--period", "3w", "octocat"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid period '3w'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn compare_two_users() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", 500, 300).await;
    mount_user(&server, "bob", 5, 3).await;
    let dir = tempdir().unwrap();

    let output = ghstats(&server, dir.path())
        .args(["--token", "t", "compare", "--json", "alice", "bob"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let body = stdout_json(&output);
    assert_eq!(body["version"], 1);
    assert_eq!(body["users"][0]["login"], "alice");
    assert_eq!(body["groups"][0]["title"], "Project Impact");
    let strengths = body["users"][0]["strengths"].as_array().unwrap();
    assert_eq!(strengths[0], "Strong repository impact with 501");
    assert!(body["users"][1]["strengths"].as_array().unwrap().is_empty());

    ghstats(&server, dir.path())
        .args(["--token", "t", "compare", "alice", "bob"])
        .assert()
        .success();
}
