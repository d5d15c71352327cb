use super::{format_metric_value, Comparison};
use crate::model::SCHEMA_VERSION;
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CompareOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub comparison: &'a Comparison,
}

pub fn output_json(comparison: &Comparison) -> Result<()> {
    let output = CompareOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        comparison,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One line per metric, with the computed difference attached.
pub fn output_ndjson(comparison: &Comparison) -> Result<()> {
    for group in &comparison.groups {
        for metric in &group.metrics {
            let line = serde_json::json!({
                "category": group.category,
                "label": metric.label,
                "value1": metric.value1,
                "value2": metric.value2,
                "importance": metric.importance,
                "percentage_difference": metric.percentage_difference(),
                "difference": metric.difference(),
            });
            println!("{line}");
        }
    }
    Ok(())
}

pub fn output_table(comparison: &Comparison) {
    let [a, b] = &comparison.users;

    println!(
        "{} {} vs {}",
        style("Comparison").bold(),
        style(&a.login).cyan(),
        style(&b.login).magenta()
    );
    println!("{}", "─".repeat(72));

    for group in &comparison.groups {
        println!("\n{}", style(&group.title).bold());
        println!("{}", style(&group.description).dim());
        for metric in &group.metrics {
            let left = format_metric_value(metric.value1, metric.format);
            let right = format_metric_value(metric.value2, metric.format);
            let (left, right) = if metric.value1 > metric.value2 {
                (style(left).green().bold(), style(right))
            } else if metric.value2 > metric.value1 {
                (style(left), style(right).green().bold())
            } else {
                (style(left), style(right))
            };
            println!(
                "  {:<24} {:>10} {:>10}   {}",
                metric.label,
                left,
                right,
                style(metric.difference()).dim()
            );
        }
    }

    println!("\n{}", style("Summary").bold());
    for user in &comparison.users {
        println!("  {} leads on {} metrics", style(&user.login).bold(), user.wins);
        for strength in &user.strengths {
            println!("    • {strength}");
        }
    }
}
