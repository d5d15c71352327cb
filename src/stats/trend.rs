use crate::model::{ContributionBucket, Trend};
use std::collections::BTreeMap;

pub const WINDOW: usize = 7;

fn window_mean(window: &[&ContributionBucket]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum: u64 = window.iter().map(|b| b.total()).sum();
    sum as f64 / window.len() as f64
}

/// Compare mean daily activity of the first and last [`WINDOW`] active dates.
///
/// With fewer than `2 * WINDOW` dates the two windows overlap. When the early
/// window has no activity the rate is 100 if anything happened later, else 0.
pub fn detect_trend(buckets: &BTreeMap<String, ContributionBucket>) -> Trend {
    if buckets.len() < 2 {
        return Trend::default();
    }

    let sorted: Vec<&ContributionBucket> = buckets.values().collect();
    let early = &sorted[..WINDOW.min(sorted.len())];
    let recent = &sorted[sorted.len().saturating_sub(WINDOW)..];

    let early_mean = window_mean(early);
    let recent_mean = window_mean(recent);

    let rate = if early_mean == 0.0 {
        if recent_mean > 0.0 { 100.0 } else { 0.0 }
    } else {
        (recent_mean - early_mean) / early_mean * 100.0
    };

    Trend {
        increasing: recent_mean > early_mean,
        rate,
    }
}
