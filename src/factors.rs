use serde::{Deserialize, Serialize};

use crate::models::{clamp_score, HealthSample, WorkSample};
use crate::settings::EffectiveSettings;

// A combined shortfall of half the expectation maps to the top of the scale.
const FULL_CONCERN_FRACTION: f64 = 0.5;
const OVERTIME_PENALTY_PER_HOUR: f64 = 5.0;
const MEETING_PENALTY_PER_HOUR: f64 = 4.0;
const RECOVERY_SCORE_NEUTRAL: f64 = 70.0;
const DEEP_SLEEP_FRACTION: f64 = 0.2;

/// Closed set of factor kinds. Descriptions, value formatting, and
/// recommendation templates match exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    SleepDeficit,
    HrvStress,
    WorkOverload,
    RecoveryDeficit,
    SleepQuality,
    HrvRecovery,
    WorkLifeBalance,
    ActivityLevel,
}

/// Physical signal behind a factor; used to deduplicate burnout- and
/// readiness-side reads of the same measurement in explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Sleep,
    HeartRate,
    Workload,
    Recovery,
}

impl FactorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::SleepDeficit => "Sleep Deficit",
            Self::HrvStress => "HRV Stress",
            Self::WorkOverload => "Work Overload",
            Self::RecoveryDeficit => "Recovery Deficit",
            Self::SleepQuality => "Sleep Quality",
            Self::HrvRecovery => "HRV Recovery",
            Self::WorkLifeBalance => "Work-Life Balance",
            Self::ActivityLevel => "Activity Level",
        }
    }

    pub fn signal(self) -> Signal {
        match self {
            Self::SleepDeficit | Self::SleepQuality => Signal::Sleep,
            Self::HrvStress | Self::HrvRecovery => Signal::HeartRate,
            Self::WorkOverload | Self::WorkLifeBalance => Signal::Workload,
            Self::RecoveryDeficit | Self::ActivityLevel => Signal::Recovery,
        }
    }

    pub fn is_burnout_side(self) -> bool {
        matches!(
            self,
            Self::SleepDeficit | Self::HrvStress | Self::WorkOverload | Self::RecoveryDeficit
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorScore {
    pub kind: FactorKind,
    pub score: f64,
    pub raw_value: f64,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct BurnoutFactors {
    pub sleep_deficit: FactorScore,
    pub hrv_stress: FactorScore,
    pub work_overload: FactorScore,
    pub recovery_deficit: FactorScore,
}

impl BurnoutFactors {
    pub fn weighted_sum(&self) -> f64 {
        self.all().iter().map(|f| f.score * f.weight).sum()
    }

    pub fn all(&self) -> [FactorScore; 4] {
        [
            self.sleep_deficit,
            self.hrv_stress,
            self.work_overload,
            self.recovery_deficit,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ReadinessFactors {
    pub sleep_quality: FactorScore,
    pub hrv_recovery: FactorScore,
    pub work_life_balance: FactorScore,
    pub activity_level: FactorScore,
}

impl ReadinessFactors {
    pub fn weighted_sum(&self) -> f64 {
        self.all().iter().map(|f| f.score * f.weight).sum()
    }

    pub fn all(&self) -> [FactorScore; 4] {
        [
            self.sleep_quality,
            self.hrv_recovery,
            self.work_life_balance,
            self.activity_level,
        ]
    }
}

pub fn burnout_factors(
    health: &HealthSample,
    work: &WorkSample,
    settings: &EffectiveSettings,
) -> BurnoutFactors {
    BurnoutFactors {
        sleep_deficit: sleep_deficit(health, settings),
        hrv_stress: hrv_stress(health, settings),
        work_overload: work_overload(work, settings),
        recovery_deficit: recovery_deficit(health, settings),
    }
}

pub fn readiness_factors(
    health: &HealthSample,
    work: &WorkSample,
    settings: &EffectiveSettings,
) -> ReadinessFactors {
    ReadinessFactors {
        sleep_quality: sleep_quality(health, settings),
        hrv_recovery: hrv_recovery(health, settings),
        work_life_balance: work_life_balance(work, settings),
        activity_level: activity_level(health, settings),
    }
}

/// Blend of sleep-duration and sleep-quality shortfalls against the adjusted
/// expectation. Components with missing inputs drop out and the blend
/// renormalizes; a shortfall inside the flexibility tolerance band scores 0.
fn sleep_deficit(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let duration_ratio = health
        .sleep_hours
        .map(|h| safe_ratio(h, settings.sleep_expectation));
    let quality_ratio = health
        .sleep_quality
        .map(|q| safe_ratio(q, settings.sleep_quality_expectation));

    let blended = match (duration_ratio, quality_ratio) {
        (Some(d), Some(q)) => 0.6 * d + 0.4 * q,
        (Some(d), None) => d,
        (None, Some(q)) => q,
        (None, None) => 1.0,
    };

    let shortfall = (1.0 - blended).max(0.0);
    let over_tolerance = (shortfall - settings.sleep_tolerance).max(0.0);
    let span = FULL_CONCERN_FRACTION - settings.sleep_tolerance;
    let score = clamp_score(over_tolerance / span * 100.0);

    FactorScore {
        kind: FactorKind::SleepDeficit,
        score,
        raw_value: health.sleep_hours.unwrap_or(settings.sleep_expectation),
        weight: settings.weights.sleep,
    }
}

/// HRV drop below baseline plus resting-heart-rate rise above baseline,
/// divided by the life-event stress-tolerance modifier.
fn hrv_stress(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let hrv_drop = health
        .heart_rate_variability
        .map_or(0.0, |hrv| (1.0 - safe_ratio(hrv, settings.hrv_baseline)).max(0.0));
    let rhr_rise = health
        .resting_heart_rate
        .map_or(0.0, |rhr| (safe_ratio(rhr, settings.resting_hr_baseline) - 1.0).max(0.0));

    let combined = 0.7 * hrv_drop + 0.3 * rhr_rise;
    let tolerance = (1.0 + settings.stress_tolerance_pct / 100.0).max(0.5);
    let score = clamp_score(combined / FULL_CONCERN_FRACTION * 100.0 / tolerance);

    FactorScore {
        kind: FactorKind::HrvStress,
        score,
        raw_value: health
            .heart_rate_variability
            .unwrap_or(settings.hrv_baseline),
        weight: settings.weights.stress,
    }
}

/// Hours-worked overage against the adjusted expectation, plus linear
/// penalties for overtime hours and meeting-hours above the personalized cap.
fn work_overload(work: &WorkSample, settings: &EffectiveSettings) -> FactorScore {
    let hours = work.hours_worked.unwrap_or(settings.work_expectation);
    let overage = hours_overage(hours, settings.work_expectation);
    let overtime = work.overtime_hours.unwrap_or(0.0).max(0.0);
    let meeting_hours = estimated_meeting_hours(work);
    let meeting_excess = (meeting_hours - settings.meeting_hours_cap).max(0.0);

    let score = clamp_score(
        overage + overtime * OVERTIME_PENALTY_PER_HOUR + meeting_excess * MEETING_PENALTY_PER_HOUR,
    );

    FactorScore {
        kind: FactorKind::WorkOverload,
        score,
        raw_value: hours,
        weight: settings.weights.workload,
    }
}

/// Deep-sleep shortfall against a 20%-of-sleep expectation plus the
/// recovery-score deficit below its neutral point.
fn recovery_deficit(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let deep_expectation = DEEP_SLEEP_FRACTION * settings.sleep_expectation;
    let deep_def = health
        .deep_sleep_hours
        .map_or(0.0, |deep| (1.0 - safe_ratio(deep, deep_expectation)).max(0.0));
    let recovery_def = health.recovery_score.map_or(0.0, |score| {
        ((RECOVERY_SCORE_NEUTRAL - score) / RECOVERY_SCORE_NEUTRAL).max(0.0)
    });

    let combined = 0.6 * deep_def + 0.4 * recovery_def;
    let score = clamp_score(combined / FULL_CONCERN_FRACTION * 100.0);

    FactorScore {
        kind: FactorKind::RecoveryDeficit,
        score,
        raw_value: health
            .recovery_score
            .unwrap_or(RECOVERY_SCORE_NEUTRAL),
        weight: settings.weights.recovery,
    }
}

fn sleep_quality(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let duration_ratio = health
        .sleep_hours
        .map_or(1.0, |h| safe_ratio(h, settings.sleep_expectation));
    let quality_ratio = health
        .sleep_quality
        .map_or(1.0, |q| safe_ratio(q, settings.sleep_quality_expectation));

    FactorScore {
        kind: FactorKind::SleepQuality,
        score: clamp_score(100.0 * (0.5 * duration_ratio + 0.5 * quality_ratio)),
        raw_value: health
            .sleep_quality
            .unwrap_or(settings.sleep_quality_expectation),
        weight: settings.weights.sleep,
    }
}

fn hrv_recovery(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let hrv_ratio = health
        .heart_rate_variability
        .map_or(1.0, |hrv| safe_ratio(hrv, settings.hrv_baseline));
    let rhr_ratio = health
        .resting_heart_rate
        .map_or(1.0, |rhr| safe_ratio(rhr, settings.resting_hr_baseline));

    FactorScore {
        kind: FactorKind::HrvRecovery,
        score: clamp_score(100.0 * (0.7 * hrv_ratio + 0.3 * (2.0 - rhr_ratio))),
        raw_value: health
            .heart_rate_variability
            .unwrap_or(settings.hrv_baseline),
        weight: settings.weights.stress,
    }
}

fn work_life_balance(work: &WorkSample, settings: &EffectiveSettings) -> FactorScore {
    let hours = work.hours_worked.unwrap_or(settings.work_expectation);
    let overage = hours_overage(hours, settings.work_expectation);
    let overtime = work.overtime_hours.unwrap_or(0.0).max(0.0);

    FactorScore {
        kind: FactorKind::WorkLifeBalance,
        score: clamp_score(100.0 - overage - overtime * OVERTIME_PENALTY_PER_HOUR),
        raw_value: hours,
        weight: settings.weights.workload,
    }
}

/// Exercise has an optimal band, not a "more is better" direction: both
/// under- and over-exercise relative to the target lower readiness.
fn activity_level(health: &HealthSample, settings: &EffectiveSettings) -> FactorScore {
    let target = settings.exercise_target_minutes;
    let minutes = health.exercise_minutes.unwrap_or(target);
    let score = if target <= 0.0 {
        100.0
    } else {
        let low = 0.5 * target;
        let high = 2.0 * target;
        let deviation = if minutes < low {
            (low - minutes) / low
        } else if minutes > high {
            (minutes - high) / high
        } else {
            0.0
        };
        clamp_score(100.0 - deviation * 100.0)
    };

    FactorScore {
        kind: FactorKind::ActivityLevel,
        score,
        raw_value: minutes,
        weight: settings.weights.recovery,
    }
}

// When only a meeting count is known, estimate one hour per meeting.
fn estimated_meeting_hours(work: &WorkSample) -> f64 {
    work.meeting_hours
        .or_else(|| work.meetings_attended.map(f64::from))
        .unwrap_or(0.0)
        .max(0.0)
}

fn hours_overage(hours: f64, expectation: f64) -> f64 {
    if expectation <= 0.0 {
        return 0.0;
    }
    ((hours / expectation - 1.0).max(0.0) / FULL_CONCERN_FRACTION) * 100.0
}

fn safe_ratio(value: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        1.0
    } else {
        value / reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Baseline;
    use crate::settings::resolve;
    use chrono::NaiveDate;

    fn settings() -> EffectiveSettings {
        let day = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        resolve(&Baseline::default(), None, &[], day)
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

    #[test]
    fn at_baseline_all_burnout_factors_are_zero() {
        let factors = burnout_factors(&baseline_health(), &baseline_work(), &settings());
        for factor in factors.all() {
            assert!(
                factor.score < 1.0,
                "{} scored {}",
                factor.kind.label(),
                factor.score
            );
        }
    }

    #[test]
    fn at_baseline_readiness_factors_are_high() {
        let factors = readiness_factors(&baseline_health(), &baseline_work(), &settings());
        for factor in factors.all() {
            assert!(
                factor.score >= 99.0,
                "{} scored {}",
                factor.kind.label(),
                factor.score
            );
        }
    }

    #[test]
    fn severe_sleep_loss_scores_above_seventy() {
        let health = HealthSample {
            sleep_hours: Some(4.0),
            ..HealthSample::default()
        };
        let factors = burnout_factors(&health, &baseline_work(), &settings());
        assert!(factors.sleep_deficit.score > 70.0);
    }

    #[test]
    fn collapsed_hrv_scores_above_seventy() {
        let health = HealthSample {
            heart_rate_variability: Some(20.0),
            ..HealthSample::default()
        };
        let factors = burnout_factors(&health, &baseline_work(), &settings());
        assert!(factors.hrv_stress.score > 70.0);
    }

    #[test]
    fn long_day_with_overtime_saturates_work_overload() {
        let work = WorkSample {
            hours_worked: Some(12.0),
            overtime_hours: Some(3.0),
            ..WorkSample::default()
        };
        let factors = burnout_factors(&baseline_health(), &work, &settings());
        assert!((factors.work_overload.score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_inputs_default_to_no_concern() {
        let factors = burnout_factors(&HealthSample::default(), &WorkSample::default(), &settings());
        for factor in factors.all() {
            assert!(factor.score.abs() < 1e-9);
        }
    }

    #[test]
    fn factor_scores_stay_in_bounds() {
        let health = HealthSample {
            sleep_hours: Some(0.0),
            sleep_quality: Some(0.0),
            deep_sleep_hours: Some(0.0),
            heart_rate_variability: Some(1.0),
            resting_heart_rate: Some(140.0),
            exercise_minutes: Some(600.0),
            recovery_score: Some(0.0),
            ..HealthSample::default()
        };
        let work = WorkSample {
            hours_worked: Some(20.0),
            overtime_hours: Some(12.0),
            meeting_hours: Some(10.0),
            ..WorkSample::default()
        };
        let s = settings();
        for factor in burnout_factors(&health, &work, &s)
            .all()
            .into_iter()
            .chain(readiness_factors(&health, &work, &s).all())
        {
            assert!((0.0..=100.0).contains(&factor.score));
        }
    }

    #[test]
    fn activity_penalty_is_u_shaped() {
        let s = settings();
        let at = |minutes: f64| {
            let health = HealthSample {
                exercise_minutes: Some(minutes),
                ..HealthSample::default()
            };
            activity_level(&health, &s).score
        };
        assert!((at(30.0) - 100.0).abs() < 1e-9);
        assert!(at(0.0) < at(20.0));
        assert!(at(180.0) < at(60.0));
    }

    #[test]
    fn meeting_overrun_penalizes_work_overload() {
        let work = WorkSample {
            hours_worked: Some(8.0),
            meeting_hours: Some(6.0),
            ..WorkSample::default()
        };
        let factors = burnout_factors(&baseline_health(), &work, &settings());
        assert!((factors.work_overload.score - 8.0).abs() < 1e-9);
    }
}
