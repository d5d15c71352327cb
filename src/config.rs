use crate::cache::DEFAULT_TTL;
use crate::cli::CommonArgs;
use crate::error::{GhStatsError, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Longest accepted cache TTL.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Validated runtime settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
    pub cache_ttl: Duration,
    pub event_pages: u32,
}

impl Config {
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let token = args.token.trim();
        if token.is_empty() {
            return Err(GhStatsError::Config("a GitHub token is required (--token or GITHUB_TOKEN)".into()));
        }

        let api_url = args.api_url.trim().trim_end_matches('/');
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(GhStatsError::Config(format!("invalid API URL '{}'", args.api_url)));
        }

        let cache_ttl = match args.cache_ttl.as_deref() {
            Some(raw) => humantime::parse_duration(raw)
                .map_err(|e| GhStatsError::Config(format!("invalid cache TTL '{raw}': {e}")))?,
            None => DEFAULT_TTL,
        };
        if cache_ttl > MAX_CACHE_TTL {
            return Err(GhStatsError::Config(format!(
                "cache TTL {} exceeds the maximum of {}",
                humantime::format_duration(cache_ttl),
                humantime::format_duration(MAX_CACHE_TTL)
            )));
        }

        if args.event_pages == 0 {
            return Err(GhStatsError::Config("--event-pages must be at least 1".into()));
        }

        Ok(Self {
            token: token.to_string(),
            api_url: api_url.to_string(),
            cache_ttl,
            event_pages: args.event_pages,
        })
    }
}
