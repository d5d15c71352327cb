use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Number,
    Ratio,
}

/// `(v2 - v1) / max(v1, 1) * 100`; non-finite inputs yield 0.
pub fn percentage_difference(value1: f64, value2: f64) -> f64 {
    if !value1.is_finite() || !value2.is_finite() {
        return 0.0;
    }
    if value1 == 0.0 && value2 == 0.0 {
        return 0.0;
    }
    (value2 - value1) / value1.max(1.0) * 100.0
}

const TIERS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Compact magnitude: `950`, `1.50K`, `12.3M`, `450B`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    for (threshold, suffix) in TIERS {
        if value >= threshold {
            let scaled = value / threshold;
            return if scaled >= 100.0 {
                format!("{}{suffix}", scaled.round())
            } else if scaled >= 10.0 {
                format!("{scaled:.1}{suffix}")
            } else {
                format!("{scaled:.2}{suffix}")
            };
        }
    }
    format!("{}", value.round())
}

pub fn format_metric_value(value: f64, format: MetricFormat) -> String {
    match format {
        MetricFormat::Ratio if value.is_finite() => format!("{value:.2}×"),
        MetricFormat::Ratio => "0".to_string(),
        MetricFormat::Number => format_number(value),
    }
}

/// Short phrase describing how the second value relates to the first.
pub fn format_difference(value1: f64, value2: f64) -> String {
    if value1 == value2 {
        return "Equal".to_string();
    }
    if value1 == 0.0 {
        return format!("{} total", format_number(value2));
    }
    if value2 == 0.0 {
        return format!("{} total", format_number(value1));
    }

    let ratio = value2 / value1;
    if ratio > 100.0 {
        return format!("{}× more", ratio.round());
    }
    if ratio > 0.0 && ratio < 0.01 {
        return format!("{}× less", (1.0 / ratio).round());
    }

    let percent = (value2 - value1) / value1 * 100.0;
    let direction = if percent > 0.0 { "more" } else { "less" };
    if percent.abs() > 100.0 {
        return format!("{}× {direction}", (percent.abs() / 100.0).round());
    }
    format!("{:.0}% {direction}", percent.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_floors_denominator() {
        assert_eq!(percentage_difference(0.0, 0.0), 0.0);
        assert_eq!(percentage_difference(0.0, 5.0), 500.0);
        assert_eq!(percentage_difference(0.5, 1.0), 50.0);
        assert_eq!(percentage_difference(10.0, 5.0), -50.0);
        assert_eq!(percentage_difference(f64::NAN, 5.0), 0.0);
        assert_eq!(percentage_difference(7.0, 7.0), 0.0);
    }

    #[test]
    fn magnitudes() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.4), "999");
        assert_eq!(format_number(1500.0), "1.50K");
        assert_eq!(format_number(12_345.0), "12.3K");
        assert_eq!(format_number(450_000.0), "450K");
        assert_eq!(format_number(2_500_000.0), "2.50M");
        assert_eq!(format_number(3e9), "3.00B");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn ratios_get_a_trailing_times() {
        assert_eq!(format_metric_value(1.5, MetricFormat::Ratio), "1.50×");
        assert_eq!(format_metric_value(1500.0, MetricFormat::Number), "1.50K");
    }

    #[test]
    fn difference_phrases() {
        assert_eq!(format_difference(3.0, 3.0), "Equal");
        assert_eq!(format_difference(0.0, 1200.0), "1.20K total");
        assert_eq!(format_difference(40.0, 0.0), "40 total");
        assert_eq!(format_difference(1.0, 500.0), "500× more");
        assert_eq!(format_difference(500.0, 1.0), "500× less");
        assert_eq!(format_difference(10.0, 35.0), "3× more");
        assert_eq!(format_difference(10.0, 15.0), "50% more");
        assert_eq!(format_difference(10.0, 8.0), "20% less");
    }
}
