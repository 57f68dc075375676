use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{ScoreHistoryPoint, Zone};
use crate::settings::EffectiveSettings;

const GOOD_RECOVERY_READINESS: f64 = 80.0;
const NO_RECOVERY_DEFAULT_DAYS: i64 = 30;
const NEEDS_BREAK_DAYS: i64 = 21;

#[derive(Debug, Clone, Copy)]
pub struct DayProfile {
    pub workload_multiplier: f64,
    pub recovery_bonus: f64,
}

pub fn day_profile(day: NaiveDate) -> DayProfile {
    match day.weekday() {
        Weekday::Sat | Weekday::Sun => DayProfile {
            workload_multiplier: 0.3,
            recovery_bonus: 10.0,
        },
        _ => DayProfile {
            workload_multiplier: 1.0,
            recovery_bonus: 0.0,
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextAdjustment {
    pub day: NaiveDate,
    pub weekend: bool,
    pub bonus_applied: f64,
}

/// Weekend-aware modulation of the work-overload factor. Working fewer
/// hours than the day's scaled expectation earns the recovery bonus instead
/// of reading as an improvement against the full baseline.
pub fn adjust_work_overload(
    score: f64,
    hours_worked: Option<f64>,
    settings: &EffectiveSettings,
    day: NaiveDate,
) -> (f64, Option<ContextAdjustment>) {
    let profile = day_profile(day);
    if profile.recovery_bonus <= 0.0 {
        return (score, None);
    }
    let expected_today = settings.work_expectation * profile.workload_multiplier;
    let hours = hours_worked.unwrap_or(0.0);
    if hours < expected_today {
        let adjusted = (score - profile.recovery_bonus).max(0.0);
        let adjustment = ContextAdjustment {
            day,
            weekend: true,
            bonus_applied: score - adjusted,
        };
        (adjusted, Some(adjustment))
    } else {
        (score, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationFatigue {
    pub days_since_recovery: i64,
    pub penalty: f64,
    pub needs_break: bool,
}

/// Accumulated fatigue from elapsed time since the last strong recovery day
/// (green zone with readiness at or above 80). With no qualifying day in
/// history the elapsed time defaults to 30 days.
pub fn assess_fatigue(history: &[ScoreHistoryPoint], today: NaiveDate) -> VacationFatigue {
    let last_recovery = history
        .iter()
        .filter(|point| {
            point.zone == Zone::Green
                && point.readiness_score >= GOOD_RECOVERY_READINESS
                && point.day <= today
        })
        .map(|point| point.day)
        .max();

    let days_since_recovery = last_recovery
        .map(|day| (today - day).num_days())
        .unwrap_or(NO_RECOVERY_DEFAULT_DAYS);

    let penalty = match days_since_recovery {
        d if d > 30 => 15.0,
        d if d > 21 => 10.0,
        d if d > 14 => 5.0,
        _ => 0.0,
    };

    VacationFatigue {
        days_since_recovery,
        penalty,
        needs_break: days_since_recovery > NEEDS_BREAK_DAYS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Baseline;
    use crate::settings::resolve;

    fn history_point(day: NaiveDate, zone: Zone, readiness: f64) -> ScoreHistoryPoint {
        ScoreHistoryPoint {
            day,
            burnout_score: 20.0,
            readiness_score: readiness,
            zone,
        }
    }

    #[test]
    fn weekend_underwork_earns_recovery_bonus() {
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let settings = resolve(&Baseline::default(), None, &[], saturday);
        let (adjusted, adjustment) = adjust_work_overload(8.0, Some(1.0), &settings, saturday);
        assert!((adjusted - 0.0).abs() < 1e-9);
        assert!(adjustment.is_some());
    }

    #[test]
    fn full_weekend_shift_gets_no_bonus() {
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let settings = resolve(&Baseline::default(), None, &[], saturday);
        let (adjusted, adjustment) = adjust_work_overload(40.0, Some(6.0), &settings, saturday);
        assert!((adjusted - 40.0).abs() < 1e-9);
        assert!(adjustment.is_none());
    }

    #[test]
    fn weekdays_are_untouched() {
        let wednesday = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let settings = resolve(&Baseline::default(), None, &[], wednesday);
        let (adjusted, adjustment) = adjust_work_overload(15.0, Some(2.0), &settings, wednesday);
        assert!((adjusted - 15.0).abs() < 1e-9);
        assert!(adjustment.is_none());
    }

    #[test]
    fn fatigue_breakpoints_follow_elapsed_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let cases = [(10, 0.0, false), (16, 5.0, false), (25, 10.0, true), (35, 15.0, true)];
        for (days_ago, expected_penalty, expected_break) in cases {
            let history = vec![history_point(
                today - chrono::Duration::days(days_ago),
                Zone::Green,
                90.0,
            )];
            let fatigue = assess_fatigue(&history, today);
            assert!((fatigue.penalty - expected_penalty).abs() < 1e-9);
            assert_eq!(fatigue.needs_break, expected_break);
        }
    }

    #[test]
    fn no_recovery_day_defaults_to_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let history = vec![
            history_point(today - chrono::Duration::days(2), Zone::Yellow, 60.0),
            history_point(today - chrono::Duration::days(3), Zone::Green, 75.0),
        ];
        let fatigue = assess_fatigue(&history, today);
        assert_eq!(fatigue.days_since_recovery, 30);
        assert!((fatigue.penalty - 10.0).abs() < 1e-9);
        assert!(fatigue.needs_break);
    }
}
