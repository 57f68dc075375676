use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::explain::Explanation;

#[derive(Debug, Clone, Default)]
pub struct HealthSample {
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<f64>,
    pub deep_sleep_hours: Option<f64>,
    pub rem_sleep_hours: Option<f64>,
    pub core_sleep_hours: Option<f64>,
    pub awake_hours: Option<f64>,
    pub resting_heart_rate: Option<f64>,
    pub heart_rate_variability: Option<f64>,
    pub exercise_minutes: Option<f64>,
    pub recovery_score: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkSample {
    pub hours_worked: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub meetings_attended: Option<i32>,
    pub meeting_hours: Option<f64>,
    pub tasks_assigned: Option<i32>,
    pub tasks_completed: Option<i32>,
    pub emails_sent: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct Baseline {
    pub sleep_hours: f64,
    pub sleep_quality: f64,
    pub hrv: f64,
    pub resting_heart_rate: f64,
    pub work_hours: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            sleep_hours: 7.0,
            sleep_quality: 70.0,
            hrv: 45.0,
            resting_heart_rate: 65.0,
            work_hours: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    EarlyBird,
    NightOwl,
    Flexible,
}

impl Chronotype {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "early_bird" => Some(Self::EarlyBird),
            "night_owl" => Some(Self::NightOwl),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialEnergy {
    Introvert,
    Extrovert,
    Ambivert,
}

impl SocialEnergy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "introvert" => Some(Self::Introvert),
            "extrovert" => Some(Self::Extrovert),
            "ambivert" => Some(Self::Ambivert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepFlexibility {
    Rigid,
    Normal,
    Flexible,
}

impl SleepFlexibility {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rigid" => Some(Self::Rigid),
            "normal" => Some(Self::Normal),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }

    pub fn tolerance_fraction(self) -> f64 {
        match self {
            Self::Rigid => 0.02,
            Self::Normal => 0.05,
            Self::Flexible => 0.10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PersonalPreferences {
    pub ideal_sleep_hours: Option<f64>,
    pub ideal_work_hours: Option<f64>,
    pub ideal_exercise_minutes: Option<f64>,
    pub weight_sleep: Option<f64>,
    pub weight_stress: Option<f64>,
    pub weight_workload: Option<f64>,
    pub weight_recovery: Option<f64>,
    pub chronotype: Option<Chronotype>,
    pub social_energy: Option<SocialEnergy>,
    pub sleep_flexibility: Option<SleepFlexibility>,
}

#[derive(Debug, Clone)]
pub struct LifeEvent {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub sleep_adjustment_pct: f64,
    pub work_adjustment_pct: f64,
    pub exercise_adjustment_pct: f64,
    pub stress_tolerance_adjustment_pct: f64,
}

impl LifeEvent {
    pub fn is_active(&self, day: NaiveDate) -> bool {
        self.start_date <= day && self.end_date.map_or(true, |end| day <= end)
    }
}

#[derive(Debug, Clone)]
pub struct FeelingCheckin {
    pub recorded_at: NaiveDate,
    pub overall_feeling: i32,
    pub stress_level: i32,
    pub algorithm_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    pub red_threshold: f64,
    pub green_threshold: f64,
    pub interaction_high: f64,
    pub interaction_critical: f64,
    pub interaction_effects_enabled: bool,
    pub weekend_adjustment_enabled: bool,
    pub calibration_window_days: i64,
    pub calibration_min_checkins: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            red_threshold: 70.0,
            green_threshold: 70.0,
            interaction_high: 50.0,
            interaction_critical: 70.0,
            interaction_effects_enabled: true,
            weekend_adjustment_enabled: true,
            calibration_window_days: 14,
            calibration_min_checkins: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Red,
    Yellow,
    Green,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "red" => Some(Self::Red),
            "yellow" => Some(Self::Yellow),
            "green" => Some(Self::Green),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringResult {
    pub person_id: Uuid,
    pub day: NaiveDate,
    pub burnout_score: f64,
    pub readiness_score: f64,
    pub zone: Zone,
    pub previous_zone: Option<Zone>,
    pub zone_changed: bool,
    pub explanation: Explanation,
}

impl ScoringResult {
    /// Condition the external alerting system reacts to.
    pub fn triggers_alert(&self) -> bool {
        self.zone_changed && matches!(self.zone, Zone::Red | Zone::Green)
    }
}

#[derive(Debug, Clone)]
pub struct ScoreHistoryPoint {
    pub day: NaiveDate,
    pub burnout_score: f64,
    pub readiness_score: f64,
    pub zone: Zone,
}

pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
