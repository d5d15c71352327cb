//! Statistics derived from a user's repositories and public events.
//!
//! Every function here is pure: it takes fetched records and rebuilds its
//! output from scratch on each call.

pub mod contributions;
pub mod languages;
pub mod scores;
pub mod tech;
pub mod trend;

pub use contributions::{
    activity_totals, aggregate_contributions, aggregate_contributions_by, heatmap, monthly_activity, Granularity,
};
pub use languages::{aggregate_languages, language_totals};
pub use scores::{
    code_review_participation, community_engagement, contribution_value, doc_quality, event_streak, impact_score,
    merge_rate, project_reach, projects_impacted, pull_request_counts, streak, tests_presence, ImpactInput,
};
pub use tech::{experience_years, main_technologies, tech_progression, TechTrend, TechUsage};
pub use trend::detect_trend;

use crate::model::{ActivitySummary, Event, GitHubStats, Repository, UserData, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn calculate_github_stats(repos: &[Repository], events: &[Event]) -> GitHubStats {
    let contributions = aggregate_contributions(events);

    GitHubStats {
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repos.iter().map(|r| r.forks_count).sum(),
        total_watchers: repos.iter().map(|r| r.watchers_count).sum(),
        repo_count: repos.len() as u64,
        languages: aggregate_languages(repos),
        activity: ActivitySummary {
            totals: activity_totals(events),
            trend: detect_trend(&contributions),
            heatmap: heatmap(&contributions),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub tests_presence: f64,
    pub documentation_quality: f64,
    pub code_review_participation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub project_reach: u64,
    pub contribution_value: f64,
    pub community_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionMetrics {
    /// Merged share of pull request events, as a whole percentage.
    pub pr_merge_rate: u32,
    pub total_contributions: u64,
    pub projects_impacted: usize,
    pub contribution_streak: u32,
    pub impact_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub last_activity: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub user: UserProfile,
    pub stats: GitHubStats,
    pub quality: QualityMetrics,
    pub impact: ImpactMetrics,
    pub contributions: ContributionMetrics,
    pub top_repos: Vec<TopRepo>,
    pub tech: Vec<TechUsage>,
    pub experience_years: f64,
    pub main_technologies: Vec<String>,
}

/// Stars weigh double. The push time in epoch milliseconds / 1e9 adds roughly
/// 0.086 points per day, so recent pushes can outrank a small star lead.
pub fn top_repos(repos: &[Repository]) -> Vec<TopRepo> {
    let mut ranked: Vec<TopRepo> = repos
        .iter()
        .map(|repo| {
            let pushed = repo.pushed_at.map_or(0.0, |ts| ts.timestamp_millis() as f64 / 1e9);
            TopRepo {
                name: repo.name.clone(),
                description: repo.description.clone(),
                language: repo.language.clone(),
                stars: repo.stargazers_count,
                forks: repo.forks_count,
                last_activity: repo.pushed_at,
                url: repo.html_url.clone(),
                score: repo.stargazers_count as f64 * 2.0 + repo.forks_count as f64 + pushed,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

pub fn build_profile_report(data: &UserData, now: DateTime<Utc>) -> ProfileReport {
    let stats = calculate_github_stats(&data.repos, &data.events);
    let activity = &stats.activity.totals;

    let (merged, total_prs) = pull_request_counts(&data.events);
    let merge_ratio = crate::util::ratio(merged as f64, total_prs as f64);

    let contributions = ContributionMetrics {
        pr_merge_rate: (merge_ratio * 100.0).round() as u32,
        total_contributions: activity.commits + activity.pull_requests + activity.issues,
        projects_impacted: projects_impacted(&data.events),
        contribution_streak: event_streak(&data.events),
        impact_score: impact_score(&ImpactInput {
            commits: activity.commits,
            prs: total_prs,
            merge_rate: merge_ratio,
            repos: stats.repo_count,
        }),
    };

    ProfileReport {
        user: data.user.clone(),
        quality: QualityMetrics {
            tests_presence: tests_presence(&data.repos),
            documentation_quality: doc_quality(&data.repos),
            code_review_participation: code_review_participation(activity),
        },
        impact: ImpactMetrics {
            project_reach: project_reach(stats.total_stars, stats.total_forks),
            contribution_value: contribution_value(stats.total_stars, stats.total_forks, activity),
            community_engagement: community_engagement(&data.events),
        },
        contributions,
        top_repos: top_repos(&data.repos),
        tech: tech_progression(&data.repos, now),
        experience_years: experience_years(&data.repos, now),
        main_technologies: main_technologies(&data.repos, now),
        stats,
    }
}
