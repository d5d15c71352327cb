//! Access to the GitHub REST API.

pub mod cached;
pub mod client;

pub use cached::Cached;
pub use client::{GitHubClient, PAGE_SIZE};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::Result;
use crate::model::{Event, Repository, UserData, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;

/// The three upstream reads the statistics are built from.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn fetch_user(&self, username: &str) -> Result<UserProfile>;

    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>>;

    /// Up to `pages` pages of public events, newest first.
    async fn fetch_events(&self, username: &str, pages: u32) -> Result<Vec<Event>>;
}

/// Fetch profile, repositories and events concurrently. The first failure
/// aborts the others.
pub async fn fetch_user_data<A>(api: &A, username: &str, event_pages: u32) -> Result<UserData>
where
    A: GitHubApi + ?Sized,
{
    let (user, repos, events) = tokio::try_join!(
        api.fetch_user(username),
        api.fetch_repos(username),
        api.fetch_events(username, event_pages),
    )?;
    log::info!(
        "fetched {username}: {} repositories, {} events",
        repos.len(),
        events.len()
    );
    Ok(UserData { user, repos, events })
}

/// Client for the configured API, behind a fresh cache with the configured TTL.
pub fn connect(config: &Config) -> Result<Cached<GitHubClient>> {
    let client = GitHubClient::new(&config.api_url, &config.token)?;
    Ok(Cached::new(client, Arc::new(Cache::new(config.cache_ttl))))
}
