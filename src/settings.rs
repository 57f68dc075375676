use chrono::NaiveDate;

use crate::models::{
    Baseline, Chronotype, LifeEvent, PersonalPreferences, SleepFlexibility, SocialEnergy,
};

const DEFAULT_EXERCISE_TARGET_MINUTES: f64 = 30.0;
const DEFAULT_MEETING_HOURS_CAP: f64 = 4.0;
const INTROVERT_MEETING_HOURS_CAP: f64 = 3.0;

#[derive(Debug, Clone, Copy)]
pub struct FactorWeights {
    pub sleep: f64,
    pub stress: f64,
    pub workload: f64,
    pub recovery: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            sleep: 0.25,
            stress: 0.25,
            workload: 0.25,
            recovery: 0.25,
        }
    }
}

impl FactorWeights {
    fn normalized(sleep: f64, stress: f64, workload: f64, recovery: f64) -> Self {
        let total = sleep + stress + workload + recovery;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            sleep: sleep / total,
            stress: stress / total,
            workload: workload / total,
            recovery: recovery / total,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub sleep_expectation: f64,
    pub sleep_quality_expectation: f64,
    pub hrv_baseline: f64,
    pub resting_hr_baseline: f64,
    pub work_expectation: f64,
    pub exercise_target_minutes: f64,
    pub meeting_hours_cap: f64,
    pub stress_tolerance_pct: f64,
    pub sleep_tolerance: f64,
    pub weights: FactorWeights,
    pub chronotype: Option<Chronotype>,
    pub social_energy: Option<SocialEnergy>,
    pub active_event_labels: Vec<String>,
}

impl EffectiveSettings {
    pub fn has_active_life_event(&self) -> bool {
        !self.active_event_labels.is_empty()
    }
}

/// Merges baseline, optional preferences, and active life events into one
/// effective settings object. Adjustment percentages from simultaneously
/// active events sum linearly before being applied.
pub fn resolve(
    baseline: &Baseline,
    preferences: Option<&PersonalPreferences>,
    life_events: &[LifeEvent],
    day: NaiveDate,
) -> EffectiveSettings {
    let baseline = sanitized(baseline);
    let active: Vec<&LifeEvent> = life_events.iter().filter(|e| e.is_active(day)).collect();

    let sleep_adj: f64 = active.iter().map(|e| e.sleep_adjustment_pct).sum();
    let work_adj: f64 = active.iter().map(|e| e.work_adjustment_pct).sum();
    let exercise_adj: f64 = active.iter().map(|e| e.exercise_adjustment_pct).sum();
    let stress_tolerance_pct: f64 = active
        .iter()
        .map(|e| e.stress_tolerance_adjustment_pct)
        .sum();

    let sleep_base = preferences
        .and_then(|p| p.ideal_sleep_hours)
        .unwrap_or(baseline.sleep_hours);
    let work_base = preferences
        .and_then(|p| p.ideal_work_hours)
        .unwrap_or(baseline.work_hours);
    let exercise_base = preferences
        .and_then(|p| p.ideal_exercise_minutes)
        .unwrap_or(DEFAULT_EXERCISE_TARGET_MINUTES);

    let weights = match preferences {
        Some(p)
            if p.weight_sleep.is_some()
                || p.weight_stress.is_some()
                || p.weight_workload.is_some()
                || p.weight_recovery.is_some() =>
        {
            FactorWeights::normalized(
                p.weight_sleep.unwrap_or(0.25),
                p.weight_stress.unwrap_or(0.25),
                p.weight_workload.unwrap_or(0.25),
                p.weight_recovery.unwrap_or(0.25),
            )
        }
        _ => FactorWeights::default(),
    };

    let social_energy = preferences.and_then(|p| p.social_energy);
    let meeting_hours_cap = match social_energy {
        Some(SocialEnergy::Introvert) => INTROVERT_MEETING_HOURS_CAP,
        _ => DEFAULT_MEETING_HOURS_CAP,
    };

    let sleep_tolerance = preferences
        .and_then(|p| p.sleep_flexibility)
        .unwrap_or(SleepFlexibility::Normal)
        .tolerance_fraction();

    EffectiveSettings {
        sleep_expectation: (sleep_base * (1.0 + sleep_adj / 100.0)).max(0.0),
        sleep_quality_expectation: baseline.sleep_quality,
        hrv_baseline: baseline.hrv,
        resting_hr_baseline: baseline.resting_heart_rate,
        work_expectation: (work_base * (1.0 + work_adj / 100.0)).max(0.0),
        exercise_target_minutes: (exercise_base * (1.0 + exercise_adj / 100.0)).max(0.0),
        meeting_hours_cap,
        stress_tolerance_pct,
        sleep_tolerance,
        weights,
        chronotype: preferences.and_then(|p| p.chronotype),
        social_energy,
        active_event_labels: active.iter().map(|e| e.label.clone()).collect(),
    }
}

// Zero or negative baseline values would poison every ratio downstream;
// replace them with the onboarding defaults.
fn sanitized(baseline: &Baseline) -> Baseline {
    let defaults = Baseline::default();
    let pick = |value: f64, fallback: f64| if value > 0.0 { value } else { fallback };
    Baseline {
        sleep_hours: pick(baseline.sleep_hours, defaults.sleep_hours),
        sleep_quality: pick(baseline.sleep_quality, defaults.sleep_quality),
        hrv: pick(baseline.hrv, defaults.hrv),
        resting_heart_rate: pick(baseline.resting_heart_rate, defaults.resting_heart_rate),
        work_hours: pick(baseline.work_hours, defaults.work_hours),
    }
}
