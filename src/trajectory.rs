use serde::{Deserialize, Serialize};

use crate::models::{clamp_score, ScoreHistoryPoint, ThresholdConfig, Zone};
use crate::scoring::classify;

pub const MIN_HISTORY_DAYS: usize = 3;
pub const FORECAST_DAYS: i64 = 7;
const TREND_DEADBAND_PER_DAY: f64 = 2.0;
const TREND_HIGH_PER_DAY: f64 = 4.0;
const MAX_DAYS_UNTIL_RED: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Worsening,
    Improving,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSeverity {
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub severity: TrendSeverity,
    pub daily_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub day_offset: i64,
    pub predicted_score: f64,
    pub predicted_zone: Zone,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub has_prediction: bool,
    pub days_analyzed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_zone: Option<Zone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_red: Option<i64>,
    pub forecast: Vec<ForecastPoint>,
}

impl Prediction {
    fn insufficient(days_analyzed: usize) -> Self {
        Self {
            has_prediction: false,
            days_analyzed,
            current_score: None,
            current_zone: None,
            trend: None,
            days_until_red: None,
            forecast: Vec::new(),
        }
    }
}

/// Ordinary least-squares forecast of the burnout score over the scoring
/// history, projected seven days forward. History must be ordered oldest
/// first; fewer than three days reports "insufficient data", not an error.
pub fn predict(history: &[ScoreHistoryPoint], config: &ThresholdConfig) -> Prediction {
    if history.len() < MIN_HISTORY_DAYS {
        return Prediction::insufficient(history.len());
    }

    let n = history.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (index, point) in history.iter().enumerate() {
        let x = index as f64;
        sum_x += x;
        sum_y += point.burnout_score;
        sum_xy += x * point.burnout_score;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    let last = &history[history.len() - 1];
    let current_score = last.burnout_score;
    let current_readiness = last.readiness_score;
    let last_index = (history.len() - 1) as f64;

    let forecast: Vec<ForecastPoint> = (1..=FORECAST_DAYS)
        .map(|offset| {
            let predicted = clamp_score(intercept + slope * (last_index + offset as f64));
            ForecastPoint {
                day_offset: offset,
                predicted_score: predicted,
                // Readiness is not forecast; hold the latest value when
                // re-deriving the projected zone.
                predicted_zone: classify(predicted, current_readiness, config),
                confidence: (95.0 - 5.0 * offset as f64).max(50.0),
            }
        })
        .collect();

    let days_until_red = if slope > 0.0 && current_score < config.red_threshold {
        let days = ((config.red_threshold - current_score) / slope).ceil() as i64;
        (days <= MAX_DAYS_UNTIL_RED).then_some(days)
    } else {
        None
    };

    let direction = if slope > TREND_DEADBAND_PER_DAY {
        TrendDirection::Worsening
    } else if slope < -TREND_DEADBAND_PER_DAY {
        TrendDirection::Improving
    } else {
        TrendDirection::Stable
    };
    let severity = if slope.abs() > TREND_HIGH_PER_DAY {
        TrendSeverity::High
    } else {
        TrendSeverity::Moderate
    };

    Prediction {
        has_prediction: true,
        days_analyzed: history.len(),
        current_score: Some(current_score),
        current_zone: Some(last.zone),
        trend: Some(Trend {
            direction,
            severity,
            daily_change: slope,
        }),
        days_until_red,
        forecast,
    }
}
