use crate::cli::CommonArgs;
use crate::compare::format_number;
use crate::config::Config;
use crate::github::{self, fetch_user_data};
use crate::model::{Trend, SCHEMA_VERSION};
use crate::stats::{build_profile_report, ProfileReport, TechTrend};
use crate::util::spinner;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfileOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub username: &'a str,
    #[serde(flatten)]
    pub report: &'a ProfileReport,
}

pub async fn exec(common: CommonArgs, username: String, json: bool, ndjson: bool) -> Result<()> {
    let config = Config::from_args(&common).context("Invalid configuration")?;
    let api = github::connect(&config).context("Failed to build GitHub client")?;

    let pb = spinner(&format!("Fetching {username}..."), !json && !ndjson);
    let data = fetch_user_data(&api, &username, config.event_pages)
        .await
        .with_context(|| format!("Failed to fetch GitHub data for {username}"))?;
    pb.finish_and_clear();

    let report = build_profile_report(&data, Utc::now());

    if json {
        output_json(&username, &report)?;
    } else if ndjson {
        output_ndjson(&report)?;
    } else {
        output_report(&report);
    }
    Ok(())
}

pub fn output_json(username: &str, report: &ProfileReport) -> Result<()> {
    let output = ProfileOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        username,
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One line per language, then one per top repository.
pub fn output_ndjson(report: &ProfileReport) -> Result<()> {
    for language in &report.stats.languages.top_languages {
        println!("{}", serde_json::json!({ "type": "language", "data": language }));
    }
    for repo in &report.top_repos {
        println!("{}", serde_json::json!({ "type": "repository", "data": repo }));
    }
    Ok(())
}

/// The trend compares the earliest and the most recent active dates, not
/// calendar weeks.
fn trend_summary(trend: &Trend, contributions: u64) -> String {
    format!("{:.1}% recent vs earliest active days ({contributions} contributions)", trend.rate)
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn output_report(report: &ProfileReport) {
    let user = &report.user;
    let stats = &report.stats;

    match &user.name {
        Some(name) => println!("{} ({})", style(name).bold(), user.login),
        None => println!("{}", style(&user.login).bold()),
    }
    if let Some(bio) = &user.bio {
        println!("{}", style(bio).dim());
    }
    println!(
        "{} followers · {} following · {} public repos",
        format_number(user.followers as f64),
        format_number(user.following as f64),
        user.public_repos
    );
    println!("{}", "─".repeat(50));

    println!("{}", style("Overview").bold());
    println!(
        "  Stars {:>8}   Forks {:>8}   Watchers {:>8}",
        format_number(stats.total_stars as f64),
        format_number(stats.total_forks as f64),
        format_number(stats.total_watchers as f64)
    );
    let trend = &stats.activity.trend;
    let arrow = if trend.increasing { style("▲").green() } else { style("▼").red() };
    println!("  Activity {} {}", arrow, trend_summary(trend, stats.activity.totals.total()));

    println!("\n{}", style("Languages").bold());
    if stats.languages.top_languages.is_empty() {
        println!("  No language data");
    }
    for lang in &stats.languages.top_languages {
        let bar = "█".repeat((lang.percentage / 5.0).round() as usize);
        println!(
            "  {:<14} {:<20} {:>5.1}%  {} repos, {:.1} stars avg",
            lang.name,
            style(bar).cyan(),
            lang.percentage,
            lang.count,
            lang.popularity
        );
    }

    let c = &report.contributions;
    println!("\n{}", style("Contributions").bold());
    println!("  Impact score        {:>6}", style(c.impact_score).yellow().bold());
    println!("  Total contributions {:>6}", c.total_contributions);
    println!("  PR merge rate       {:>5}%", c.pr_merge_rate);
    println!("  Projects impacted   {:>6}", c.projects_impacted);
    println!("  Current streak      {:>6} days", c.contribution_streak);

    let q = &report.quality;
    let i = &report.impact;
    println!("\n{}", style("Quality & impact").bold());
    println!("  Tests presence      {:>6}", percent(q.tests_presence));
    println!("  Documentation       {:>6}", percent(q.documentation_quality));
    println!("  Review participation {:>5}", percent(q.code_review_participation));
    println!("  Project reach       {:>6}", format_number(i.project_reach as f64));
    println!("  Contribution value  {:>6.2}", i.contribution_value);
    println!("  Community engagement {:>5}", percent(i.community_engagement));

    if !report.tech.is_empty() {
        println!("\n{}", style("Tech progression").bold());
        println!(
            "  {:.1} years of public work, mostly {}",
            report.experience_years,
            report.main_technologies.join(", ")
        );
        for tech in &report.tech {
            let marker = match tech.trend {
                TechTrend::Up => style("↑").green(),
                TechTrend::Stable => style("→").yellow(),
                TechTrend::Down => style("↓").red(),
            };
            println!(
                "  {} {:<14} {:>5.1}%  last used {}",
                marker,
                tech.name,
                tech.percentage,
                tech.last_used.format("%Y-%m-%d")
            );
        }
    }

    if !report.top_repos.is_empty() {
        println!("\n{}", style("Top repositories").bold());
        for repo in report.top_repos.iter().take(5) {
            println!(
                "  {:<30} ★ {:>6}  ⑂ {:>5}  {}",
                repo.name,
                format_number(repo.stars as f64),
                format_number(repo.forks as f64),
                style(repo.language.as_deref().unwrap_or("-")).dim()
            );
        }
    }
}
