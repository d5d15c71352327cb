use crate::model::{ContributionBucket, Event, EventKind, Repository};
use crate::util::{clamp_non_negative, ratio};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Consecutive active days counted back from the most recent active day.
pub fn streak<'a, I>(timestamps: I) -> u32
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    let days: BTreeSet<NaiveDate> = timestamps.into_iter().map(|ts| ts.date_naive()).collect();
    let mut newest_first = days.iter().rev();
    let Some(mut previous) = newest_first.next().copied() else {
        return 0;
    };

    let mut length = 1;
    for &day in newest_first {
        if (previous - day).num_days() != 1 {
            break;
        }
        length += 1;
        previous = day;
    }
    length
}

pub fn event_streak(events: &[Event]) -> u32 {
    streak(events.iter().map(|e| &e.created_at))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactInput {
    pub commits: u64,
    pub prs: u64,
    /// Fraction of pull requests merged, in `[0, 1]`.
    pub merge_rate: f64,
    pub repos: u64,
}

const COMMITS_CEILING: f64 = 1000.0;
const PRS_CEILING: f64 = 100.0;
const REPOS_CEILING: f64 = 50.0;

fn unit(value: f64) -> f64 {
    clamp_non_negative(value).min(1.0)
}

/// Weighted composite in `0..=100`.
pub fn impact_score(input: &ImpactInput) -> u32 {
    if input.commits == 0 && input.prs == 0 && input.repos == 0 {
        return 0;
    }

    let score = unit(input.commits as f64 / COMMITS_CEILING) * 0.4
        + unit(input.prs as f64 / PRS_CEILING) * 0.3
        + unit(input.merge_rate) * 0.2
        + unit(input.repos as f64 / REPOS_CEILING) * 0.1;

    (score * 100.0).round() as u32
}

fn average_over_repos(repos: &[Repository], score: impl Fn(&Repository) -> f64) -> f64 {
    let sum: f64 = repos.iter().map(score).sum();
    clamp_non_negative(sum / repos.len().max(1) as f64)
}

/// Heuristic in `[0, 1]` from testing topics and test-like repository names.
pub fn tests_presence(repos: &[Repository]) -> f64 {
    average_over_repos(repos, |repo| {
        let tagged = repo.topics.iter().any(|t| t == "testing" || t == "tests");
        let named = repo.name.contains("test") || repo.name.contains("spec");
        (if tagged { 0.7 } else { 0.0 }) + (if named { 0.3 } else { 0.0 })
    })
}

/// Heuristic in `[0, 1]`; every repository is assumed to carry a README.
pub fn doc_quality(repos: &[Repository]) -> f64 {
    average_over_repos(repos, |repo| {
        let mut score = 0.4;
        if repo.has_wiki {
            score += 0.2;
        }
        if repo.has_pages {
            score += 0.2;
        }
        if !repo.topics.is_empty() {
            score += 0.2;
        }
        score
    })
}

pub fn contribution_value(total_stars: u64, total_forks: u64, activity: &ContributionBucket) -> f64 {
    let impact = (total_stars as f64 * 2.0 + total_forks as f64 * 3.0) / 100.0;
    let work = (activity.commits as f64 + activity.pull_requests as f64 * 3.0 + activity.reviews as f64 * 2.0) / 100.0;
    clamp_non_negative((impact + work) / 2.0)
}

/// Share of events that are comments on issues, reviews or commits.
pub fn community_engagement(events: &[Event]) -> f64 {
    let interactions = events.iter().filter(|e| e.kind.is_interaction()).count();
    ratio(interactions as f64, events.len() as f64)
}

/// `(merged, total)` pull request events.
pub fn pull_request_counts(events: &[Event]) -> (u64, u64) {
    events.iter().fold((0, 0), |(merged, total), event| match &event.kind {
        EventKind::PullRequest(payload) => (merged + u64::from(payload.is_merged()), total + 1),
        _ => (merged, total),
    })
}

pub fn merge_rate(events: &[Event]) -> f64 {
    let (merged, total) = pull_request_counts(events);
    ratio(merged as f64, total as f64)
}

pub fn code_review_participation(activity: &ContributionBucket) -> f64 {
    ratio(activity.reviews as f64, activity.pull_requests as f64)
}

pub fn projects_impacted(events: &[Event]) -> usize {
    events.iter().map(|e| e.repo.name.as_str()).collect::<HashSet<_>>().len()
}

pub fn project_reach(total_stars: u64, total_forks: u64) -> u64 {
    total_stars + total_forks * 2
}
