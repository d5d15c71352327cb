use crate::model::{ContributionBucket, Event, EventKind, HeatmapDay, MonthlyActivity};
use crate::util::{day_key, month_key, month_label};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Day,
    Month,
}

impl Granularity {
    pub fn key(&self, timestamp: &DateTime<Utc>) -> String {
        match self {
            Granularity::Day => day_key(timestamp),
            Granularity::Month => month_key(timestamp),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }
}

/// What a single event adds to its bucket.
pub fn contribution_of(event: &Event) -> ContributionBucket {
    let mut bucket = ContributionBucket::default();
    match &event.kind {
        EventKind::Push(payload) => bucket.commits = payload.commits.len() as u64,
        EventKind::PullRequest(payload) if payload.action.as_deref() == Some("opened") => {
            bucket.pull_requests = 1;
        }
        EventKind::Issues(payload) if payload.action.as_deref() == Some("opened") => bucket.issues = 1,
        EventKind::PullRequestReview => bucket.reviews = 1,
        _ => {}
    }
    bucket
}

fn add(into: &mut ContributionBucket, from: &ContributionBucket) {
    into.commits += from.commits;
    into.pull_requests += from.pull_requests;
    into.issues += from.issues;
    into.reviews += from.reviews;
}

/// Sparse bucket map keyed by period; periods without activity are absent.
/// Iteration order is ascending by key.
pub fn aggregate_contributions_by(events: &[Event], granularity: Granularity) -> BTreeMap<String, ContributionBucket> {
    let mut buckets: BTreeMap<String, ContributionBucket> = BTreeMap::new();
    for event in events {
        let contribution = contribution_of(event);
        if contribution.is_empty() {
            continue;
        }
        add(buckets.entry(granularity.key(&event.created_at)).or_default(), &contribution);
    }
    buckets
}

pub fn aggregate_contributions(events: &[Event]) -> BTreeMap<String, ContributionBucket> {
    aggregate_contributions_by(events, Granularity::Day)
}

pub fn activity_totals(events: &[Event]) -> ContributionBucket {
    let mut totals = ContributionBucket::default();
    for event in events {
        add(&mut totals, &contribution_of(event));
    }
    totals
}

pub fn heatmap(buckets: &BTreeMap<String, ContributionBucket>) -> Vec<HeatmapDay> {
    buckets
        .iter()
        .map(|(date, counts)| HeatmapDay {
            date: date.clone(),
            total: counts.total(),
            commits: counts.commits,
            pull_requests: counts.pull_requests,
            issues: counts.issues,
            reviews: counts.reviews,
        })
        .collect()
}

/// Month-by-month activity since `since`, counting reopened pull requests and
/// issues as well as opened ones. Months are returned oldest first.
pub fn monthly_activity(events: &[Event], since: DateTime<Utc>) -> Vec<MonthlyActivity> {
    let mut months: BTreeMap<NaiveDate, MonthlyActivity> = BTreeMap::new();

    for event in events.iter().filter(|e| e.created_at >= since) {
        let day = event.day();
        let Some(first_of_month) = NaiveDate::from_ymd_opt(day.year(), day.month(), 1) else {
            continue;
        };
        let entry = months.entry(first_of_month).or_insert_with(|| MonthlyActivity {
            month: month_label(first_of_month),
            commits: 0,
            pull_requests: 0,
            issues: 0,
        });

        let opened_or_reopened = |action: Option<&str>| matches!(action, Some("opened") | Some("reopened"));
        match &event.kind {
            EventKind::Push(payload) => entry.commits += payload.commits.len() as u64,
            EventKind::PullRequest(payload) if opened_or_reopened(payload.action.as_deref()) => {
                entry.pull_requests += 1;
            }
            EventKind::Issues(payload) if opened_or_reopened(payload.action.as_deref()) => entry.issues += 1,
            _ => {}
        }
    }

    months.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssuesPayload, PullRequestPayload, PushPayload};
    use pretty_assertions::assert_eq;

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn push(ts: &str, commits: usize) -> Event {
        Event::new(EventKind::Push(PushPayload::with_commits(commits)), at(ts), "o/r")
    }

    fn pr(ts: &str, action: &str) -> Event {
        Event::new(EventKind::PullRequest(PullRequestPayload::action(action)), at(ts), "o/r")
    }

    fn issue(ts: &str, action: &str) -> Event {
        Event::new(EventKind::Issues(IssuesPayload::action(action)), at(ts), "o/r")
    }

    #[test]
    fn daily_buckets() {
        let events = vec![
            push("2024-01-01T08:00:00Z", 3),
            pr("2024-01-01T09:00:00Z", "opened"),
            issue("2024-01-02T10:00:00Z", "opened"),
        ];
        let buckets = aggregate_contributions(&events);
        let expected: BTreeMap<String, ContributionBucket> = [
            ("2024-01-01".to_string(), ContributionBucket { commits: 3, pull_requests: 1, issues: 0, reviews: 0 }),
            ("2024-01-02".to_string(), ContributionBucket { commits: 0, pull_requests: 0, issues: 1, reviews: 0 }),
        ]
        .into_iter()
        .collect();
        assert_eq!(buckets, expected);
    }

    #[test]
    fn ignored_events_leave_no_bucket() {
        let events = vec![
            pr("2024-01-03T00:00:00Z", "closed"),
            issue("2024-01-04T00:00:00Z", "closed"),
            push("2024-01-05T00:00:00Z", 0),
            Event::new(EventKind::Other("WatchEvent".into()), at("2024-01-06T00:00:00Z"), "o/r"),
            Event::new(EventKind::IssueComment, at("2024-01-07T00:00:00Z"), "o/r"),
        ];
        assert!(aggregate_contributions(&events).is_empty());
        assert!(activity_totals(&events).is_empty());
    }

    #[test]
    fn reviews_count_unconditionally() {
        let events = vec![Event::new(EventKind::PullRequestReview, at("2024-01-01T00:00:00Z"), "o/r")];
        let buckets = aggregate_contributions(&events);
        assert_eq!(buckets["2024-01-01"].reviews, 1);
    }

    #[test]
    fn monthly_granularity_and_heatmap() {
        let events = vec![
            push("2024-01-31T23:00:00Z", 1),
            push("2024-01-01T00:00:00Z", 2),
            push("2024-02-01T00:00:00Z", 4),
        ];
        let buckets = aggregate_contributions_by(&events, Granularity::Month);
        let days = heatmap(&buckets);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01");
        assert_eq!(days[0].total, 3);
        assert_eq!(days[1].date, "2024-02");
        assert_eq!(days[1].commits, 4);
    }

    #[test]
    fn monthly_activity_counts_reopened_and_respects_since() {
        let events = vec![
            push("2023-06-01T00:00:00Z", 5),
            pr("2024-03-02T00:00:00Z", "reopened"),
            issue("2024-03-09T00:00:00Z", "opened"),
            push("2024-01-15T00:00:00Z", 2),
            Event::new(EventKind::PullRequestReview, at("2024-03-10T00:00:00Z"), "o/r"),
        ];
        let months = monthly_activity(&events, at("2024-01-01T00:00:00Z"));
        assert_eq!(
            months,
            vec![
                MonthlyActivity { month: "Jan 2024".into(), commits: 2, pull_requests: 0, issues: 0 },
                MonthlyActivity { month: "Mar 2024".into(), commits: 0, pull_requests: 1, issues: 1 },
            ]
        );
    }
}
