use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::GhStatsError;
use crate::github::{self, GitHubApi};
use crate::model::{ActivityOutput, MonthlyActivity, SCHEMA_VERSION};
use crate::stats::monthly_activity;
use crate::util::spinner;
use anyhow::Context;
use chrono::{DateTime, Months, Utc};
use console::style;
use std::fmt;
use std::str::FromStr;

/// How far back the monthly activity view reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    SixMonths,
    OneYear,
    TwoYears,
    All,
}

impl Period {
    pub fn months(&self) -> u32 {
        match self {
            Period::SixMonths => 6,
            Period::OneYear => 12,
            Period::TwoYears => 24,
            Period::All => 48,
        }
    }

    /// Event pages to request; only the widest period goes past the first.
    pub fn pages(&self) -> u32 {
        match self {
            Period::All => 3,
            _ => 1,
        }
    }

    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::All => "all",
        }
    }
}

impl FromStr for Period {
    type Err = GhStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6m" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "all" => Ok(Period::All),
            _ => Err(GhStatsError::InvalidPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub async fn exec(common: CommonArgs, username: String, period: String, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let period: Period = period.parse()?;
    let config = Config::from_args(&common).context("Invalid configuration")?;
    let api = github::connect(&config).context("Failed to build GitHub client")?;

    let now = Utc::now();
    let since = period.since(now);

    let pb = spinner(&format!("Fetching {period} of activity for {username}..."), !json && !ndjson);
    let events = api
        .fetch_events(&username, period.pages())
        .await
        .with_context(|| format!("Failed to fetch events for {username}"))?;
    pb.finish_and_clear();
    log::debug!("{} events fetched, keeping those since {since}", events.len());

    let months = monthly_activity(&events, since);

    if json {
        let output = ActivityOutput {
            version: SCHEMA_VERSION,
            generated_at: now,
            username: username.clone(),
            period: period.to_string(),
            since,
            months,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for month in &months {
            println!("{}", serde_json::to_string(month)?);
        }
    } else {
        output_table(&months, &username, period);
    }

    Ok(())
}

fn output_table(months: &[MonthlyActivity], username: &str, period: Period) {
    println!("{} {} ({})", style("Monthly Activity").bold(), style(username).cyan(), period);
    println!("{}", "─".repeat(50));

    if months.is_empty() {
        println!("No public activity in this period");
        return;
    }

    println!("{:<10} {:>8} {:>8} {:>8}", "Month", "Commits", "PRs", "Issues");
    for month in months {
        println!(
            "{:<10} {:>8} {:>8} {:>8}",
            month.month,
            style(month.commits).green(),
            style(month.pull_requests).blue(),
            style(month.issues).yellow()
        );
    }
}
