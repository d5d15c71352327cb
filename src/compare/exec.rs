use super::output::{output_json, output_ndjson, output_table};
use super::{compare, UserSummary};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::github::{self, fetch_user_data};
use crate::stats::build_profile_report;
use crate::util::spinner;
use anyhow::Context;
use chrono::Utc;

pub async fn exec(common: CommonArgs, first: String, second: String, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let config = Config::from_args(&common).context("Invalid configuration")?;
    let api = github::connect(&config).context("Failed to build GitHub client")?;

    let pb = spinner(&format!("Fetching {first} and {second}..."), !json && !ndjson);
    let (a, b) = tokio::try_join!(
        async {
            fetch_user_data(&api, &first, config.event_pages)
                .await
                .with_context(|| format!("Failed to fetch GitHub data for {first}"))
        },
        async {
            fetch_user_data(&api, &second, config.event_pages)
                .await
                .with_context(|| format!("Failed to fetch GitHub data for {second}"))
        },
    )?;
    pb.finish_and_clear();

    let now = Utc::now();
    let summaries = [
        UserSummary::from_report(&build_profile_report(&a, now)),
        UserSummary::from_report(&build_profile_report(&b, now)),
    ];
    let comparison = compare(&summaries).context("Comparison needs exactly two users")?;

    if json {
        output_json(&comparison)?;
    } else if ndjson {
        output_ndjson(&comparison)?;
    } else {
        output_table(&comparison);
    }

    Ok(())
}
