use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhStatsError>;

#[derive(Error, Debug)]
pub enum GhStatsError {
    #[error("GitHub rejected the credentials (HTTP 401)")]
    Unauthorized,
    #[error("GitHub rate limit exceeded (HTTP 403)")]
    RateLimited { reset: Option<DateTime<Utc>> },
    #[error("GitHub resource not found: {0}")]
    NotFound(String),
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid period '{0}', expected one of 6m, 1y, 2y, all")]
    InvalidPeriod(String),
}

impl GhStatsError {
    /// Classify a non-success upstream status into the matching error.
    pub fn from_status(status: u16, resource: &str, message: String, reset: Option<DateTime<Utc>>) -> Self {
        match status {
            401 => GhStatsError::Unauthorized,
            403 => GhStatsError::RateLimited { reset },
            404 => GhStatsError::NotFound(resource.to_string()),
            _ => GhStatsError::Api { status, message },
        }
    }

    /// Message meant for the person running the tool, one per failure class.
    pub fn user_message(&self) -> String {
        match self {
            GhStatsError::Unauthorized => {
                "Your GitHub token was rejected. Re-authenticate and set a valid GITHUB_TOKEN.".to_string()
            }
            GhStatsError::RateLimited { reset: Some(reset) } => format!(
                "GitHub API rate limit reached. Try again after {}.",
                reset.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            GhStatsError::RateLimited { reset: None } => {
                "GitHub API rate limit reached. Wait a while or use an authenticated token.".to_string()
            }
            GhStatsError::NotFound(what) => format!("GitHub user or resource '{what}' was not found."),
            GhStatsError::Config(msg) => format!("Configuration problem: {msg}"),
            GhStatsError::InvalidPeriod(_) => self.to_string(),
            _ => "Something went wrong while talking to GitHub. Please try again.".to_string(),
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GhStatsError::Unauthorized
                | GhStatsError::RateLimited { .. }
                | GhStatsError::NotFound(_)
                | GhStatsError::Api { .. }
                | GhStatsError::Http(_)
        )
    }
}
