use crate::error::Result;
use crate::model::SCHEMA_VERSION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self { now: Mutex::new(Instant::now()) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Entry {
    payload: String,
    expires_at: Instant,
}

/// In-memory key to serialized-payload cache with a fixed time-to-live.
///
/// Entries are expired lazily when read. Concurrent misses on the same key
/// are not coalesced; both callers go upstream and the last write wins.
pub struct Cache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Cache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn versioned(key: &str) -> String {
        format!("v{SCHEMA_VERSION}:{key}")
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let key = Self::versioned(key);
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired = match entries.get(&key) {
            Some(entry) if entry.expires_at > now => return Some(entry.payload.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            log::debug!("cache entry {key} expired");
            entries.remove(&key);
        }
        None
    }

    /// Store `payload` for one TTL. A TTL too large to represent as an
    /// expiry instant leaves the cache untouched.
    pub fn set(&self, key: &str, payload: String) {
        let Some(expires_at) = self.clock.now().checked_add(self.ttl) else {
            log::warn!("cache TTL {:?} overflows, not caching {key}", self.ttl);
            return;
        };
        self.lock().insert(Self::versioned(key), Entry { payload, expires_at });
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().remove(&Self::versioned(key)).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        self.set(key, payload);
        Ok(())
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
