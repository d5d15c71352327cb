//! Side-by-side comparison of two users.

pub mod exec;
pub mod format;
pub mod output;

pub use exec::exec;
pub use format::{format_difference, format_metric_value, format_number, percentage_difference, MetricFormat};

use crate::stats::ProfileReport;
use crate::util::{ratio, round_to};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Impact,
    Activity,
    Community,
    Quality,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 4] = [
        MetricCategory::Impact,
        MetricCategory::Activity,
        MetricCategory::Community,
        MetricCategory::Quality,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MetricCategory::Impact => "Project Impact",
            MetricCategory::Activity => "Development Activity",
            MetricCategory::Community => "Community Engagement",
            MetricCategory::Quality => "Code Quality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricCategory::Impact => "Metrics that show the overall influence and reach of projects",
            MetricCategory::Activity => "Indicators of development frequency and consistency",
            MetricCategory::Community => "Measures of social interaction and community engagement",
            MetricCategory::Quality => "Indicators of code quality and project maintenance",
        }
    }
}

/// The numbers a comparison needs about one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub repo_count: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub followers: u64,
    pub following: u64,
    pub recent_commits: u64,
    pub contribution_streak: u32,
    pub impact_score: u32,
    /// In `[0, 1]`.
    pub documentation_quality: f64,
}

impl UserSummary {
    pub fn from_report(report: &ProfileReport) -> Self {
        Self {
            login: report.user.login.clone(),
            repo_count: report.stats.repo_count,
            total_stars: report.stats.total_stars,
            total_forks: report.stats.total_forks,
            followers: report.user.followers,
            following: report.user.following,
            recent_commits: report.stats.activity.totals.commits,
            contribution_streak: report.contributions.contribution_streak,
            impact_score: report.contributions.impact_score,
            documentation_quality: report.quality.documentation_quality,
        }
    }

    fn average_stars(&self) -> f64 {
        ratio(self.total_stars as f64, self.repo_count as f64).round()
    }

    fn fork_rate(&self) -> f64 {
        round_to(ratio(self.total_forks as f64, self.repo_count as f64), 1)
    }

    fn engagement_ratio(&self) -> f64 {
        round_to(ratio(self.followers as f64, self.following as f64), 2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetric {
    pub label: String,
    pub description: String,
    pub value1: f64,
    pub value2: f64,
    pub category: MetricCategory,
    /// 1 (minor) to 5 (headline).
    pub importance: u8,
    pub format: MetricFormat,
}

impl ComparisonMetric {
    fn new(
        label: &str,
        description: &str,
        category: MetricCategory,
        importance: u8,
        format: MetricFormat,
        (value1, value2): (f64, f64),
    ) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
            value1,
            value2,
            category,
            importance,
            format,
        }
    }

    pub fn percentage_difference(&self) -> f64 {
        percentage_difference(self.value1, self.value2)
    }

    pub fn difference(&self) -> String {
        format_difference(self.value1, self.value2)
    }
}

/// The fixed metric catalog, in declaration order.
pub fn metric_catalog(a: &UserSummary, b: &UserSummary) -> Vec<ComparisonMetric> {
    use MetricCategory::*;
    use MetricFormat::*;

    let pair = |f: &dyn Fn(&UserSummary) -> f64| (f(a), f(b));

    vec![
        ComparisonMetric::new(
            "Repository Impact",
            "Combined stars and forks - indicates project popularity",
            Impact,
            5,
            Number,
            pair(&|u: &UserSummary| (u.total_stars + u.total_forks) as f64),
        ),
        ComparisonMetric::new(
            "Impact Score",
            "Weighted commits, pull requests, merge rate and repositories",
            Impact,
            4,
            Number,
            pair(&|u: &UserSummary| f64::from(u.impact_score)),
        ),
        ComparisonMetric::new(
            "Fork Rate",
            "Average forks per repository - code reuse indicator",
            Impact,
            3,
            Number,
            pair(&UserSummary::fork_rate),
        ),
        ComparisonMetric::new(
            "Recent Commits",
            "Commits pushed in recent public events",
            Activity,
            4,
            Number,
            pair(&|u: &UserSummary| u.recent_commits as f64),
        ),
        ComparisonMetric::new(
            "Repository Count",
            "Total public repositories",
            Activity,
            3,
            Number,
            pair(&|u: &UserSummary| u.repo_count as f64),
        ),
        ComparisonMetric::new(
            "Contribution Streak",
            "Consecutive days with public activity",
            Activity,
            2,
            Number,
            pair(&|u: &UserSummary| f64::from(u.contribution_streak)),
        ),
        ComparisonMetric::new(
            "Community Size",
            "Total followers - community reach",
            Community,
            4,
            Number,
            pair(&|u: &UserSummary| u.followers as f64),
        ),
        ComparisonMetric::new(
            "Engagement Ratio",
            "Followers to following ratio - influence indicator (higher is better)",
            Community,
            3,
            Ratio,
            pair(&UserSummary::engagement_ratio),
        ),
        ComparisonMetric::new(
            "Average Stars",
            "Average stars per repository - quality indicator",
            Quality,
            4,
            Number,
            pair(&UserSummary::average_stars),
        ),
        ComparisonMetric::new(
            "Documentation Quality",
            "Wiki, pages and topics coverage across repositories",
            Quality,
            3,
            Number,
            pair(&|u: &UserSummary| (u.documentation_quality * 100.0).round()),
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: MetricCategory,
    pub title: String,
    pub description: String,
    pub metrics: Vec<ComparisonMetric>,
}

/// Metrics grouped per category, categories in fixed order and metrics by
/// descending importance. Sorting is stable, so ties keep catalog order.
pub fn group_metrics(metrics: &[ComparisonMetric]) -> Vec<CategoryGroup> {
    MetricCategory::ALL
        .iter()
        .filter_map(|&category| {
            let mut in_category: Vec<ComparisonMetric> =
                metrics.iter().filter(|m| m.category == category).cloned().collect();
            if in_category.is_empty() {
                return None;
            }
            in_category.sort_by(|x, y| y.importance.cmp(&x.importance));
            Some(CategoryGroup {
                category,
                title: category.title().to_string(),
                description: category.description().to_string(),
                metrics: in_category,
            })
        })
        .collect()
}

/// Up to three most important metrics where the chosen user is ahead.
pub fn strengths(metrics: &[ComparisonMetric], first_user: bool) -> Vec<String> {
    let mut ahead: Vec<&ComparisonMetric> = metrics
        .iter()
        .filter(|m| {
            let diff = m.percentage_difference();
            if first_user { diff < 0.0 } else { diff > 0.0 }
        })
        .collect();
    ahead.sort_by(|x, y| y.importance.cmp(&x.importance));
    ahead
        .into_iter()
        .take(3)
        .map(|m| {
            let value = if first_user { m.value1 } else { m.value2 };
            format!("Strong {} with {}", m.label.to_lowercase(), format_metric_value(value, m.format))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserVerdict {
    pub login: String,
    /// Metrics where this user's value is strictly higher.
    pub wins: usize,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub groups: Vec<CategoryGroup>,
    pub users: [UserVerdict; 2],
}

/// Compare exactly two users; any other number yields `None`.
pub fn compare(users: &[UserSummary]) -> Option<Comparison> {
    let [a, b] = users else {
        return None;
    };

    let metrics = metric_catalog(a, b);
    let wins_a = metrics.iter().filter(|m| m.value1 > m.value2).count();
    let wins_b = metrics.iter().filter(|m| m.value2 > m.value1).count();

    Some(Comparison {
        users: [
            UserVerdict { login: a.login.clone(), wins: wins_a, strengths: strengths(&metrics, true) },
            UserVerdict { login: b.login.clone(), wins: wins_b, strengths: strengths(&metrics, false) },
        ],
        groups: group_metrics(&metrics),
    })
}
