use chrono::NaiveDate;
use uuid::Uuid;

use crate::calibration;
use crate::context;
use crate::explain::{self, ExplanationInputs};
use crate::factors;
use crate::interactions;
use crate::models::{
    clamp_score, Baseline, FeelingCheckin, HealthSample, LifeEvent, PersonalPreferences,
    ScoreHistoryPoint, ScoringResult, ThresholdConfig, WorkSample, Zone,
};
use crate::settings;

/// Everything one day's computation depends on. The engine never reads
/// anything else, so re-running with the same inputs reproduces the result.
pub struct DayInputs<'a> {
    pub person_id: Uuid,
    pub day: NaiveDate,
    pub health: &'a HealthSample,
    pub work: &'a WorkSample,
    pub baseline: &'a Baseline,
    pub preferences: Option<&'a PersonalPreferences>,
    pub life_events: &'a [LifeEvent],
    pub checkins: &'a [FeelingCheckin],
    pub history: &'a [ScoreHistoryPoint],
    pub config: &'a ThresholdConfig,
}

pub fn classify(burnout_score: f64, readiness_score: f64, config: &ThresholdConfig) -> Zone {
    if burnout_score >= config.red_threshold {
        Zone::Red
    } else if readiness_score >= config.green_threshold {
        Zone::Green
    } else {
        Zone::Yellow
    }
}

/// Runs the full per-day pipeline: resolve settings, compute factors, apply
/// the weekend context, add interaction and fatigue penalties, calibrate
/// against self-reports, classify, and explain.
pub fn score_day(inputs: &DayInputs<'_>) -> ScoringResult {
    let settings = settings::resolve(
        inputs.baseline,
        inputs.preferences,
        inputs.life_events,
        inputs.day,
    );

    let mut burnout_factors = factors::burnout_factors(inputs.health, inputs.work, &settings);
    let context_adjustment = if inputs.config.weekend_adjustment_enabled {
        let (adjusted, adjustment) = context::adjust_work_overload(
            burnout_factors.work_overload.score,
            inputs.work.hours_worked,
            &settings,
            inputs.day,
        );
        burnout_factors.work_overload.score = adjusted;
        adjustment
    } else {
        None
    };

    let readiness_factors = factors::readiness_factors(inputs.health, inputs.work, &settings);
    let interaction_outcome = interactions::evaluate(&burnout_factors, inputs.config);
    let fatigue = context::assess_fatigue(inputs.history, inputs.day);
    let calibration = calibration::calibrate(inputs.checkins, inputs.day, inputs.config);

    let raw_burnout = clamp_score(
        burnout_factors.weighted_sum() + interaction_outcome.total_penalty + fatigue.penalty,
    );
    let burnout_score = clamp_score(raw_burnout * calibration.factor);
    let readiness_score = clamp_score(readiness_factors.weighted_sum());

    let zone = classify(burnout_score, readiness_score, inputs.config);
    let previous_zone = inputs
        .history
        .iter()
        .filter(|point| point.day < inputs.day)
        .max_by_key(|point| point.day)
        .map(|point| point.zone);
    let zone_changed = previous_zone.is_some_and(|previous| previous != zone);

    let explanation = explain::build(&ExplanationInputs {
        burnout: &burnout_factors,
        readiness: &readiness_factors,
        interactions: &interaction_outcome,
        fatigue: &fatigue,
        calibration: &calibration,
        context: context_adjustment.as_ref(),
        zone,
        settings: &settings,
    });

    ScoringResult {
        person_id: inputs.person_id,
        day: inputs.day,
        burnout_score,
        readiness_score,
        zone,
        previous_zone,
        zone_changed,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FactorKind;
    use crate::interactions::InteractionSeverity;
    use chrono::Duration;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    fn baseline_health() -> HealthSample {
        HealthSample {
            sleep_hours: Some(7.0),
            sleep_quality: Some(70.0),
            deep_sleep_hours: Some(1.4),
            resting_heart_rate: Some(65.0),
            heart_rate_variability: Some(45.0),
            exercise_minutes: Some(30.0),
            recovery_score: Some(70.0),
            ..HealthSample::default()
        }
    }

    fn baseline_work() -> WorkSample {
        WorkSample {
            hours_worked: Some(8.0),
            overtime_hours: Some(0.0),
            meetings_attended: Some(3),
            tasks_assigned: Some(5),
            tasks_completed: Some(5),
            ..WorkSample::default()
        }
    }

    fn recent_recovery_history(day: NaiveDate) -> Vec<ScoreHistoryPoint> {
        vec![ScoreHistoryPoint {
            day: day - Duration::days(1),
            burnout_score: 10.0,
            readiness_score: 90.0,
            zone: Zone::Green,
        }]
    }

    fn inputs<'a>(
        health: &'a HealthSample,
        work: &'a WorkSample,
        baseline: &'a Baseline,
        history: &'a [ScoreHistoryPoint],
        config: &'a ThresholdConfig,
    ) -> DayInputs<'a> {
        DayInputs {
            person_id: Uuid::new_v4(),
            day: wednesday(),
            health,
            work,
            baseline,
            preferences: None,
            life_events: &[],
            checkins: &[],
            history,
            config,
        }
    }

    #[test]
    fn zone_classification_is_monotonic() {
        let config = ThresholdConfig::default();
        assert_eq!(classify(69.9, 50.0, &config), Zone::Yellow);
        assert_eq!(classify(70.0, 50.0, &config), Zone::Red);
        assert_eq!(classify(95.0, 95.0, &config), Zone::Red);
        assert_eq!(classify(30.0, 69.9, &config), Zone::Yellow);
        assert_eq!(classify(30.0, 70.0, &config), Zone::Green);
    }

    #[test]
    fn baseline_employee_scores_near_zero_burnout() {
        let health = baseline_health();
        let work = baseline_work();
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let history = recent_recovery_history(wednesday());
        let result = score_day(&inputs(&health, &work, &baseline, &history, &config));

        assert!(result.burnout_score < 10.0, "burnout {}", result.burnout_score);
        assert!(matches!(result.zone, Zone::Green | Zone::Yellow));
        assert!(result.explanation.interactions.is_none());
    }

    #[test]
    fn compounding_stress_goes_red_with_critical_interactions() {
        let health = HealthSample {
            sleep_hours: Some(4.0),
            heart_rate_variability: Some(20.0),
            ..HealthSample::default()
        };
        let work = WorkSample {
            hours_worked: Some(12.0),
            overtime_hours: Some(3.0),
            ..WorkSample::default()
        };
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let result = score_day(&inputs(&health, &work, &baseline, &[], &config));

        assert!(result.burnout_score >= 85.0, "burnout {}", result.burnout_score);
        assert_eq!(result.zone, Zone::Red);

        let effects = &result.explanation.interactions.as_ref().unwrap().effects;
        let critical_pair = |a: FactorKind, b: FactorKind| {
            effects
                .iter()
                .any(|e| e.first == a && e.second == b && e.severity == InteractionSeverity::Critical)
        };
        assert!(critical_pair(FactorKind::SleepDeficit, FactorKind::WorkOverload));
        assert!(critical_pair(FactorKind::HrvStress, FactorKind::WorkOverload));
    }

    #[test]
    fn scores_stay_in_bounds_under_extreme_inputs() {
        let health = HealthSample {
            sleep_hours: Some(0.0),
            sleep_quality: Some(0.0),
            deep_sleep_hours: Some(0.0),
            heart_rate_variability: Some(1.0),
            resting_heart_rate: Some(180.0),
            exercise_minutes: Some(0.0),
            recovery_score: Some(0.0),
            ..HealthSample::default()
        };
        let work = WorkSample {
            hours_worked: Some(20.0),
            overtime_hours: Some(12.0),
            meeting_hours: Some(12.0),
            ..WorkSample::default()
        };
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let result = score_day(&inputs(&health, &work, &baseline, &[], &config));

        assert!((0.0..=100.0).contains(&result.burnout_score));
        assert!((0.0..=100.0).contains(&result.readiness_score));
    }

    #[test]
    fn rerunning_the_same_day_is_deterministic() {
        let health = HealthSample {
            sleep_hours: Some(5.5),
            heart_rate_variability: Some(35.0),
            ..HealthSample::default()
        };
        let work = WorkSample {
            hours_worked: Some(10.0),
            ..WorkSample::default()
        };
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let history = recent_recovery_history(wednesday());
        let day_inputs = inputs(&health, &work, &baseline, &history, &config);

        let first = score_day(&day_inputs);
        let second = score_day(&day_inputs);
        assert_eq!(first.burnout_score, second.burnout_score);
        assert_eq!(first.readiness_score, second.readiness_score);
        assert_eq!(first.zone, second.zone);
    }

    #[test]
    fn zone_change_tracks_the_previous_day() {
        let health = HealthSample {
            sleep_hours: Some(3.0),
            heart_rate_variability: Some(15.0),
            recovery_score: Some(10.0),
            ..HealthSample::default()
        };
        let work = WorkSample {
            hours_worked: Some(13.0),
            overtime_hours: Some(4.0),
            ..WorkSample::default()
        };
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let history = recent_recovery_history(wednesday());
        let result = score_day(&inputs(&health, &work, &baseline, &history, &config));

        assert_eq!(result.zone, Zone::Red);
        assert_eq!(result.previous_zone, Some(Zone::Green));
        assert!(result.zone_changed);
        assert!(result.triggers_alert());
    }

    #[test]
    fn first_day_has_no_transition() {
        let health = baseline_health();
        let work = baseline_work();
        let baseline = Baseline::default();
        let config = ThresholdConfig::default();
        let result = score_day(&inputs(&health, &work, &baseline, &[], &config));
        assert!(result.previous_zone.is_none());
        assert!(!result.zone_changed);
        assert!(!result.triggers_alert());
    }
}
