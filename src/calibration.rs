use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{FeelingCheckin, ThresholdConfig};

pub const CALIBRATION_FLOOR: f64 = 0.8;
pub const CALIBRATION_CEILING: f64 = 1.2;
const MIN_PAIRED_SCORES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calibration {
    pub factor: f64,
    pub checkins_considered: usize,
    pub discrepancy: Option<f64>,
}

impl Calibration {
    pub fn neutral(checkins_considered: usize) -> Self {
        Self {
            factor: 1.0,
            checkins_considered,
            discrepancy: None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.discrepancy.is_none()
    }
}

/// Compares subjective check-ins over the configured rolling window to the
/// algorithmic scores recorded alongside them, and derives a multiplicative
/// correction bounded to [0.8, 1.2]. Below the configured minimums the
/// result is the neutral factor 1.0, not an error.
pub fn calibrate(
    checkins: &[FeelingCheckin],
    today: NaiveDate,
    config: &ThresholdConfig,
) -> Calibration {
    let cutoff = today - Duration::days(config.calibration_window_days.max(1));
    let windowed: Vec<&FeelingCheckin> = checkins
        .iter()
        .filter(|c| c.recorded_at > cutoff && c.recorded_at <= today)
        .collect();

    if windowed.len() < config.calibration_min_checkins {
        return Calibration::neutral(windowed.len());
    }

    let paired: Vec<f64> = windowed.iter().filter_map(|c| c.algorithm_score).collect();
    if paired.len() < MIN_PAIRED_SCORES {
        return Calibration::neutral(windowed.len());
    }

    let count = windowed.len() as f64;
    let avg_feeling = windowed.iter().map(|c| f64::from(c.overall_feeling)).sum::<f64>() / count;
    let avg_stress = windowed.iter().map(|c| f64::from(c.stress_level)).sum::<f64>() / count;
    let subjective = (5.0 - avg_feeling) * 20.0 + (avg_stress - 1.0) * 10.0;

    let avg_algorithm = paired.iter().sum::<f64>() / paired.len() as f64;
    let discrepancy = subjective - avg_algorithm;
    let factor = (1.0 + discrepancy / 100.0).clamp(CALIBRATION_FLOOR, CALIBRATION_CEILING);

    Calibration {
        factor,
        checkins_considered: windowed.len(),
        discrepancy: Some(discrepancy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn checkin(days_ago: i64, feeling: i32, stress: i32, score: Option<f64>) -> FeelingCheckin {
        FeelingCheckin {
            recorded_at: today() - Duration::days(days_ago),
            overall_feeling: feeling,
            stress_level: stress,
            algorithm_score: score,
        }
    }

    #[test]
    fn fewer_than_three_checkins_stay_neutral() {
        let checkins = vec![checkin(1, 2, 4, Some(40.0)), checkin(2, 2, 4, Some(45.0))];
        let result = calibrate(&checkins, today(), &ThresholdConfig::default());
        assert!((result.factor - 1.0).abs() < 1e-9);
        assert!(result.is_neutral());
    }

    #[test]
    fn unpaired_checkins_stay_neutral() {
        let checkins = vec![
            checkin(1, 2, 4, None),
            checkin(2, 2, 4, Some(40.0)),
            checkin(3, 2, 4, None),
        ];
        let result = calibrate(&checkins, today(), &ThresholdConfig::default());
        assert!(result.is_neutral());
    }

    #[test]
    fn feeling_worse_than_the_algorithm_raises_the_factor() {
        // Subjective equivalent: (5-2)*20 + (4-1)*10 = 90; algorithm avg 40.
        let checkins = vec![
            checkin(1, 2, 4, Some(40.0)),
            checkin(3, 2, 4, Some(40.0)),
            checkin(5, 2, 4, Some(40.0)),
        ];
        let result = calibrate(&checkins, today(), &ThresholdConfig::default());
        assert!((result.factor - CALIBRATION_CEILING).abs() < 1e-9);
        assert!((result.discrepancy.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn feeling_better_than_the_algorithm_is_floored() {
        // Subjective equivalent: (5-5)*20 + (1-1)*10 = 0; algorithm avg 80.
        let checkins = vec![
            checkin(1, 5, 1, Some(80.0)),
            checkin(2, 5, 1, Some(80.0)),
            checkin(4, 5, 1, Some(80.0)),
        ];
        let result = calibrate(&checkins, today(), &ThresholdConfig::default());
        assert!((result.factor - CALIBRATION_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn factor_is_always_within_bounds() {
        for feeling in 1..=5 {
            for stress in 1..=5 {
                let checkins = vec![
                    checkin(1, feeling, stress, Some(0.0)),
                    checkin(2, feeling, stress, Some(100.0)),
                    checkin(3, feeling, stress, Some(50.0)),
                ];
                let result = calibrate(&checkins, today(), &ThresholdConfig::default());
                assert!(result.factor >= CALIBRATION_FLOOR && result.factor <= CALIBRATION_CEILING);
            }
        }
    }

    #[test]
    fn checkins_outside_the_window_are_ignored() {
        let checkins = vec![
            checkin(20, 1, 5, Some(10.0)),
            checkin(25, 1, 5, Some(10.0)),
            checkin(30, 1, 5, Some(10.0)),
        ];
        let result = calibrate(&checkins, today(), &ThresholdConfig::default());
        assert!(result.is_neutral());
        assert_eq!(result.checkins_considered, 0);
    }
}
