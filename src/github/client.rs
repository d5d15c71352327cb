use super::GitHubApi;
use crate::error::{GhStatsError, Result};
use crate::model::{Event, Repository, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Items requested per page; a shorter page is the last one.
pub const PAGE_SIZE: usize = 100;

const ACCEPT_JSON: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ghstats/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, username: &str, suffix: &str) -> String {
        format!("{}/users/{}{}", self.base_url, urlencoding::encode(username), suffix)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)], resource: &str) -> Result<T> {
        log::debug!("GET {url} {query:?}");
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;

        let response = check_status(response, resource).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reset = rate_limit_reset(response.headers());
    let message = response.text().await.unwrap_or_default();
    log::warn!("GitHub returned {status} for {resource}");
    Err(GhStatsError::from_status(status.as_u16(), resource, message, reset))
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let secs: i64 = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        self.get_json(&self.user_url(username, ""), &[], username).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let query = [("per_page", PAGE_SIZE.to_string())];
        self.get_json(&self.user_url(username, "/repos"), &query, username).await
    }

    async fn fetch_events(&self, username: &str, pages: u32) -> Result<Vec<Event>> {
        let url = self.user_url(username, "/events");
        let mut events = Vec::new();

        for page in 1..=pages.max(1) {
            let query = [("per_page", PAGE_SIZE.to_string()), ("page", page.to_string())];
            let batch: Vec<Event> = self.get_json(&url, &query, username).await?;
            let last = batch.len() < PAGE_SIZE;
            events.extend(batch);
            if last {
                break;
            }
        }

        Ok(events)
    }
}
