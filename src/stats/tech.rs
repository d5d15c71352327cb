use crate::model::Repository;
use crate::util::{ratio, round_to};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Repositories updated within this window count as recent usage.
pub const RECENT_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechTrend {
    Up,
    Stable,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechUsage {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
    pub trend: TechTrend,
    pub last_used: DateTime<Utc>,
}

pub fn tech_progression(repos: &[Repository], now: DateTime<Utc>) -> Vec<TechUsage> {
    let mut usage: HashMap<&str, Vec<DateTime<Utc>>> = HashMap::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref() {
            usage.entry(language).or_default().push(repo.updated_at);
        }
    }

    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let mut techs: Vec<TechUsage> = usage
        .into_iter()
        .filter_map(|(name, dates)| {
            let last_used = dates.iter().max().copied()?;
            let count = dates.len() as u64;
            let recent = dates.iter().filter(|d| **d >= recent_cutoff).count() as f64;
            let trend = if recent > count as f64 / 4.0 {
                TechTrend::Up
            } else if recent == 0.0 {
                TechTrend::Down
            } else {
                TechTrend::Stable
            };
            Some(TechUsage {
                name: name.to_string(),
                count,
                percentage: ratio(count as f64, repos.len() as f64) * 100.0,
                trend,
                last_used,
            })
        })
        .collect();

    techs.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.name.cmp(&b.name))
    });
    techs
}

/// Years since the oldest repository was created, one decimal.
pub fn experience_years(repos: &[Repository], now: DateTime<Utc>) -> f64 {
    let Some(first) = repos.iter().map(|r| r.created_at).min() else {
        return 0.0;
    };
    let days = (now - first).num_days().max(0) as f64;
    round_to(days / 365.0, 1)
}

pub fn main_technologies(repos: &[Repository], now: DateTime<Utc>) -> Vec<String> {
    tech_progression(repos, now)
        .into_iter()
        .take(3)
        .map(|t| t.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(language: &str, created: &str, updated: &str) -> Repository {
        Repository {
            language: Some(language.to_string()),
            created_at: created.parse().unwrap(),
            updated_at: updated.parse().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn trends_follow_recent_updates() {
        let now: DateTime<Utc> = "2024-06-01T00:00:00Z".parse().unwrap();
        let repos = vec![
            repo("Rust", "2020-01-01T00:00:00Z", "2024-05-20T00:00:00Z"),
            repo("Rust", "2021-01-01T00:00:00Z", "2022-01-01T00:00:00Z"),
            repo("Go", "2021-01-01T00:00:00Z", "2021-06-01T00:00:00Z"),
            repo("Python", "2022-01-01T00:00:00Z", "2024-04-01T00:00:00Z"),
            repo("Python", "2022-01-01T00:00:00Z", "2023-01-01T00:00:00Z"),
            repo("Python", "2022-01-01T00:00:00Z", "2023-01-01T00:00:00Z"),
            repo("Python", "2022-01-01T00:00:00Z", "2023-01-01T00:00:00Z"),
            repo("Python", "2022-01-01T00:00:00Z", "2023-01-01T00:00:00Z"),
        ];
        let techs = tech_progression(&repos, now);
        let names: Vec<_> = techs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Python", "Rust", "Go"]);
        assert_eq!(techs[0].trend, TechTrend::Stable);
        assert_eq!(techs[1].trend, TechTrend::Up);
        assert_eq!(techs[2].trend, TechTrend::Down);
        assert_eq!(techs[1].last_used, "2024-05-20T00:00:00Z".parse::<DateTime<Utc>>().unwrap());

        assert_eq!(main_technologies(&repos, now), ["Python", "Rust", "Go"]);
        assert_eq!(experience_years(&repos, now), 4.4);
        assert_eq!(experience_years(&[], now), 0.0);
    }
}
