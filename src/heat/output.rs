use crate::model::{HeatOutput, HeatmapDay, Trend, SCHEMA_VERSION};
use crate::stats::Granularity;
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(heat_data: &[HeatmapDay], username: &str, granularity: Granularity, trend: Trend) -> Result<()> {
    let output = HeatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        username: username.to_string(),
        granularity: granularity.as_str().to_string(),
        buckets: heat_data.to_vec(),
        trend,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(heat_data: &[HeatmapDay]) -> Result<()> {
    for bucket in heat_data {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

/// Five intensity levels relative to the busiest bucket.
pub fn intensity(value: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * 5.0) as u32
}

pub fn output_heatmap(heat_data: &[HeatmapDay], username: &str, trend: Trend) -> Result<()> {
    if heat_data.is_empty() {
        println!("No public activity for {username}");
        return Ok(());
    }

    let max_total = heat_data.iter().map(|b| b.total).max().unwrap_or(1);

    println!("{} {}", style("Contribution Heatmap").bold(), style(username).cyan());
    println!("{}", "─".repeat(50));

    for bucket in heat_data {
        let block = match intensity(bucket.total, max_total) {
            0 => " ",
            1 => "▁",
            2 => "▃",
            3 => "▅",
            4 => "▇",
            _ => "█",
        };

        println!(
            "{:<10} {} {:>4}  commits: {:>3}, PRs: {:>2}, issues: {:>2}, reviews: {:>2}",
            bucket.date,
            style(block).green(),
            bucket.total,
            bucket.commits,
            bucket.pull_requests,
            bucket.issues,
            bucket.reviews
        );
    }

    let direction = if trend.increasing { style("increasing").green() } else { style("not increasing").red() };
    println!("\nTrend: {} ({:+.1}%)", direction, trend.rate);

    println!("\n{}", style("Legend").bold());
    println!("  {} contribution intensity", style("▁▃▅▇█").green());

    Ok(())
}
