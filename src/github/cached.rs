use super::GitHubApi;
use crate::cache::Cache;
use crate::error::Result;
use crate::model::{Event, Repository, UserProfile};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Wraps any [`GitHubApi`] and serves repeated reads from a shared [`Cache`].
///
/// Failed fetches are never cached.
pub struct Cached<A> {
    inner: A,
    cache: Arc<Cache>,
}

impl<A: GitHubApi> Cached<A> {
    pub fn new(inner: A, cache: Arc<Cache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    async fn through<T, F>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>>,
    {
        match self.cache.get_json::<T>(&key) {
            Ok(Some(hit)) => {
                log::debug!("cache hit {key}");
                return Ok(hit);
            }
            Ok(None) => log::debug!("cache miss {key}"),
            Err(err) => {
                log::warn!("dropping unreadable cache entry {key}: {err}");
                self.cache.invalidate(&key);
            }
        }

        let value = fetch.await?;
        self.cache.set_json(&key, &value)?;
        Ok(value)
    }
}

fn key(kind: &str, username: &str) -> String {
    format!("{kind}:{}", urlencoding::encode(username))
}

#[async_trait]
impl<A: GitHubApi> GitHubApi for Cached<A> {
    async fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        self.through(key("user", username), self.inner.fetch_user(username)).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.through(key("repos", username), self.inner.fetch_repos(username)).await
    }

    async fn fetch_events(&self, username: &str, pages: u32) -> Result<Vec<Event>> {
        let key = format!("{}:{pages}", key("events", username));
        self.through(key, self.inner.fetch_events(username, pages)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::GhStatsError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl GitHubApi for Counting {
        async fn fetch_user(&self, username: &str) -> Result<UserProfile> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GhStatsError::NotFound(username.to_string()));
            }
            Ok(UserProfile { login: username.to_string(), ..Default::default() })
        }

        async fn fetch_repos(&self, _username: &str) -> Result<Vec<Repository>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn fetch_events(&self, _username: &str, _pages: u32) -> Result<Vec<Event>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    fn cached(fail: bool) -> (Cached<Counting>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(Cache::with_clock(Duration::from_secs(60), clock.clone()));
        (Cached::new(Counting { fail, ..Default::default() }, cache), clock)
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache_until_expiry() {
        let (api, clock) = cached(false);
        api.fetch_user("octocat").await.unwrap();
        let again = api.fetch_user("octocat").await.unwrap();
        assert_eq!(again.login, "octocat");
        assert_eq!(api.inner().calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::from_secs(61));
        api.fetch_user("octocat").await.unwrap();
        assert_eq!(api.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn event_pages_are_part_of_the_key() {
        let (api, _clock) = cached(false);
        api.fetch_events("octocat", 1).await.unwrap();
        api.fetch_events("octocat", 3).await.unwrap();
        api.fetch_events("octocat", 1).await.unwrap();
        assert_eq!(api.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (api, _clock) = cached(true);
        assert!(api.fetch_user("ghost").await.is_err());
        assert!(api.fetch_user("ghost").await.is_err());
        assert_eq!(api.inner().calls.load(Ordering::SeqCst), 2);
        assert!(api.cache().is_empty());
    }
}
