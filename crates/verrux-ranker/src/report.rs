//! Human-readable rendering of predictions and rankings.

use std::fmt::Write as _;

use serde::Serialize;

use crate::engine::{PredictionResult, Ranking};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessBanner {
    High,
    Low,
}

impl SuccessBanner {
    pub fn for_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            SuccessBanner::High
        } else {
            SuccessBanner::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SuccessBanner::High => "High probability of successful treatment",
            SuccessBanner::Low => "Low probability of treatment success",
        }
    }
}

/// Probability as a percentage rounded to two decimals, keeping at least one
/// decimal place: 0.82 → "82.0%", 0.8235 → "82.35%".
///
/// Rounding happens once, on the binary value of `probability × 100`.
pub fn format_success_rate(probability: f64) -> String {
    let fixed = format!("{:.2}", probability * 100.0);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0%")
    } else {
        format!("{trimmed}%")
    }
}

pub fn render_prediction(result: &PredictionResult, threshold: f64) -> String {
    let banner = SuccessBanner::for_probability(result.probability, threshold);
    let mut out = String::new();
    let _ = writeln!(out, "Treatment method:       {}", result.treatment_method);
    let _ = writeln!(out, "Estimated cost:         {}", result.cost);
    let _ = writeln!(out, "Predicted success rate: {}", format_success_rate(result.probability));
    let _ = writeln!(out, "{}", banner.message());
    out
}

pub fn render_ranking(ranking: &Ranking, threshold: f64) -> String {
    let mut out = String::new();
    let width = ranking
        .rows
        .iter()
        .map(|r| r.treatment_method.len())
        .max()
        .unwrap_or(0)
        .max("Treatment Method".len());

    let _ = writeln!(
        out,
        "{:<4} {:<width$}  {:>14}  {:>11}  {:>12}",
        "#", "Treatment Method", "Estimated Cost", "Probability", "Success Rate"
    );
    for (i, row) in ranking.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<width$}  {:>14}  {:>11.4}  {:>12}",
            i + 1,
            row.treatment_method,
            row.cost,
            row.probability,
            format_success_rate(row.probability)
        );
    }

    if let Some(top) = ranking.recommended() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Recommended: {} ({}, estimated cost {})",
            top.treatment_method,
            format_success_rate(top.probability),
            top.cost
        );
        let _ = writeln!(
            out,
            "{}",
            SuccessBanner::for_probability(top.probability, threshold).message()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_rate_formatting() {
        assert_eq!(format_success_rate(0.82), "82.0%");
        assert_eq!(format_success_rate(0.8235), "82.35%");
        assert_eq!(format_success_rate(0.5), "50.0%");
        assert_eq!(format_success_rate(0.0), "0.0%");
        assert_eq!(format_success_rate(1.0), "100.0%");
        assert_eq!(format_success_rate(0.123456), "12.35%");
        assert_eq!(format_success_rate(0.823), "82.3%");
        assert_eq!(format_success_rate(0.99995), "100.0%");
    }

    #[test]
    fn test_success_rate_rounds_binary_value_once() {
        // p × 100 lands just below the decimal tie for these
        assert_eq!(format_success_rate(0.00015), "0.01%");
        assert_eq!(format_success_rate(0.00045), "0.04%");
        assert_eq!(format_success_rate(0.00035), "0.03%");
        assert_eq!(format_success_rate(0.012345), "1.23%");
        // exact binary tie rounds to even
        assert_eq!(format_success_rate(0.00125), "0.12%");
        assert_eq!(format_success_rate(0.004999), "0.5%");
    }

    #[test]
    fn test_banner_threshold_inclusive() {
        assert_eq!(SuccessBanner::for_probability(0.5, 0.5), SuccessBanner::High);
        assert_eq!(SuccessBanner::for_probability(0.4999, 0.5), SuccessBanner::Low);
    }

    #[test]
    fn test_render_prediction() {
        let result = PredictionResult {
            treatment_method: "Cryotherapy".to_string(),
            probability: 0.82,
            cost: 3738,
        };
        let text = render_prediction(&result, 0.5);
        assert!(text.contains("82.0%"));
        assert!(text.contains("3738"));
        assert!(text.contains("High probability of successful treatment"));
    }

    #[test]
    fn test_render_ranking_highlights_top() {
        let ranking = Ranking {
            rows: vec![
                PredictionResult { treatment_method: "Laser".into(), probability: 0.7, cost: 14_000 },
                PredictionResult { treatment_method: "Topical".into(), probability: 0.2, cost: 900 },
            ],
        };
        let text = render_ranking(&ranking, 0.5);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("Laser"));
        assert!(lines[2].contains("Topical"));
        assert!(text.contains("Recommended: Laser (70.0%"));
    }
}
