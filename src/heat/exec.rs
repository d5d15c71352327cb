use super::{output_heatmap, output_json, output_ndjson};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::github::{self, GitHubApi};
use crate::stats::{aggregate_contributions_by, detect_trend, heatmap, Granularity};
use crate::util::spinner;
use anyhow::Context;

pub async fn exec(common: CommonArgs, username: String, json: bool, ndjson: bool, monthly: bool) -> anyhow::Result<()> {
    let config = Config::from_args(&common).context("Invalid configuration")?;
    let api = github::connect(&config).context("Failed to build GitHub client")?;

    let pb = spinner(&format!("Fetching events for {username}..."), !json && !ndjson);
    let events = api
        .fetch_events(&username, config.event_pages)
        .await
        .with_context(|| format!("Failed to fetch events for {username}"))?;
    pb.finish_and_clear();

    let granularity = if monthly { Granularity::Month } else { Granularity::Day };
    let buckets = aggregate_contributions_by(&events, granularity);
    // Trend compares calendar days, whatever the display granularity.
    let trend = if monthly {
        detect_trend(&aggregate_contributions_by(&events, Granularity::Day))
    } else {
        detect_trend(&buckets)
    };
    let heat_data = heatmap(&buckets);

    if json {
        output_json(&heat_data, &username, granularity, trend)?;
    } else if ndjson {
        output_ndjson(&heat_data)?;
    } else {
        output_heatmap(&heat_data, &username, trend)?;
    }

    Ok(())
}
