use std::fmt::Write;

use crate::models::{ScoreHistoryPoint, ScoringResult};
use crate::trajectory::{Prediction, TrendDirection, TrendSeverity};

pub fn build_report(
    full_name: &str,
    email: &str,
    since_days: i64,
    history: &[ScoreHistoryPoint],
    latest: Option<&ScoringResult>,
    prediction: &Prediction,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Burnout Early Warning Report");
    let _ = writeln!(output, "Generated for {full_name} ({email}), last {since_days} days");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Current Status");

    match latest {
        None => {
            let _ = writeln!(output, "No scoring results recorded for this window.");
        }
        Some(result) => {
            let _ = writeln!(
                output,
                "- Zone: **{}** (burnout {:.1}, readiness {:.1})",
                result.zone.as_str(),
                result.burnout_score,
                result.readiness_score
            );
            if result.triggers_alert() {
                let _ = writeln!(
                    output,
                    "- Zone changed from {} — alert condition met",
                    result
                        .previous_zone
                        .map_or("unknown", |zone| zone.as_str())
                );
            }
            if let Some(fatigue) = &result.explanation.fatigue {
                let _ = writeln!(
                    output,
                    "- {} days since last strong recovery day (+{:.0} fatigue)",
                    fatigue.days_since_recovery, fatigue.penalty
                );
            }
            if let Some(calibration) = &result.explanation.calibration {
                let _ = writeln!(
                    output,
                    "- Self-reports shifted the score by a factor of {:.2}",
                    calibration.factor
                );
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score History");
    if history.is_empty() {
        let _ = writeln!(output, "No scored days in this window.");
    } else {
        for point in history.iter().rev().take(10) {
            let _ = writeln!(
                output,
                "- {}: burnout {:.1}, readiness {:.1} ({})",
                point.day,
                point.burnout_score,
                point.readiness_score,
                point.zone.as_str()
            );
        }
    }

    if let Some(result) = latest {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Top Factors");
        for factor in &result.explanation.ranked_factors {
            let _ = writeln!(
                output,
                "- {} ({}): {:.0}/100 — {}",
                factor.label, factor.value, factor.score, factor.description
            );
        }
        if let Some(interactions) = &result.explanation.interactions {
            let _ = writeln!(output);
            let _ = writeln!(output, "## Compounding Effects");
            for effect in &interactions.effects {
                let _ = writeln!(
                    output,
                    "- {} × {}: +{:.1} ({:?})",
                    effect.first.label(),
                    effect.second.label(),
                    effect.penalty,
                    effect.severity
                );
            }
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendations");
        let _ = writeln!(output, "### For you");
        for rec in &result.explanation.personal_recommendations {
            let _ = writeln!(output, "- {rec}");
        }
        let _ = writeln!(output, "### For your manager");
        for rec in &result.explanation.leadership_recommendations {
            let _ = writeln!(output, "- {rec}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Outlook");
    if !prediction.has_prediction {
        let _ = writeln!(
            output,
            "Not enough scored days for a forecast ({} of 3 needed).",
            prediction.days_analyzed
        );
    } else {
        if let Some(trend) = &prediction.trend {
            let direction = match trend.direction {
                TrendDirection::Worsening => "worsening",
                TrendDirection::Improving => "improving",
                TrendDirection::Stable => "stable",
            };
            let severity = match trend.severity {
                TrendSeverity::High => " (high)",
                TrendSeverity::Moderate => "",
            };
            let _ = writeln!(
                output,
                "Trend: {direction}{severity}, {:+.1} points/day over {} days",
                trend.daily_change, prediction.days_analyzed
            );
        }
        if let Some(days) = prediction.days_until_red {
            let _ = writeln!(output, "Projected to cross into red in ~{days} days.");
        }
        for point in &prediction.forecast {
            let _ = writeln!(
                output,
                "- Day +{}: {:.1} ({}) at {:.0}% confidence",
                point.day_offset,
                point.predicted_score,
                point.predicted_zone.as_str(),
                point.confidence
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThresholdConfig, Zone};
    use crate::trajectory;
    use chrono::{Duration, NaiveDate};

    fn history() -> Vec<ScoreHistoryPoint> {
        let start = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        (0..5)
            .map(|i| ScoreHistoryPoint {
                day: start + Duration::days(i),
                burnout_score: 40.0 + 3.0 * i as f64,
                readiness_score: 60.0,
                zone: Zone::Yellow,
            })
            .collect()
    }

    #[test]
    fn report_includes_history_and_outlook() {
        let history = history();
        let prediction = trajectory::predict(&history, &ThresholdConfig::default());
        let report = build_report("Maya Chen", "maya.chen@example.com", 30, &history, None, &prediction);

        assert!(report.contains("# Burnout Early Warning Report"));
        assert!(report.contains("Maya Chen"));
        assert!(report.contains("## Score History"));
        assert!(report.contains("Day +7"));
    }

    #[test]
    fn empty_history_renders_placeholders() {
        let prediction = trajectory::predict(&[], &ThresholdConfig::default());
        let report = build_report("Tomás Rivera", "tomas.rivera@example.com", 30, &[], None, &prediction);

        assert!(report.contains("No scoring results recorded"));
        assert!(report.contains("No scored days"));
        assert!(report.contains("Not enough scored days"));
    }
}
