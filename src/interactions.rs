use serde::{Deserialize, Serialize};

use crate::factors::{BurnoutFactors, FactorKind};
use crate::models::ThresholdConfig;

pub const INTERACTION_PENALTY_CAP: f64 = 30.0;

// Fixed factor pairs with their synergy multipliers. Simultaneous elevation
// of these pairs compounds faster than either factor alone.
const PAIRS: [(FactorKind, FactorKind, f64); 4] = [
    (FactorKind::SleepDeficit, FactorKind::WorkOverload, 1.30),
    (FactorKind::HrvStress, FactorKind::WorkOverload, 1.25),
    (FactorKind::SleepDeficit, FactorKind::HrvStress, 1.20),
    (FactorKind::SleepDeficit, FactorKind::RecoveryDeficit, 1.35),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSeverity {
    Elevated,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEffect {
    pub first: FactorKind,
    pub second: FactorKind,
    pub penalty: f64,
    pub severity: InteractionSeverity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub effects: Vec<InteractionEffect>,
    pub total_penalty: f64,
}

/// Evaluates the fixed factor pairs. A pair fires only when both factors
/// exceed the `high` threshold; the excess amounts combine via geometric
/// mean so the penalty stays near zero until both are meaningfully elevated.
/// The summed penalty is capped at 30.
pub fn evaluate(factors: &BurnoutFactors, config: &ThresholdConfig) -> InteractionOutcome {
    if !config.interaction_effects_enabled {
        return InteractionOutcome::default();
    }

    let high = config.interaction_high;
    let critical = config.interaction_critical;
    let mut effects = Vec::new();
    let mut total = 0.0;

    for (first, second, multiplier) in PAIRS {
        let a = score_of(factors, first);
        let b = score_of(factors, second);
        if a <= high || b <= high {
            continue;
        }
        let excess = ((a - high) * (b - high)).sqrt();
        let penalty = excess * (multiplier - 1.0);
        let severity = if a > critical && b > critical {
            InteractionSeverity::Critical
        } else {
            InteractionSeverity::Elevated
        };
        total += penalty;
        effects.push(InteractionEffect {
            first,
            second,
            penalty,
            severity,
        });
    }

    InteractionOutcome {
        effects,
        total_penalty: total.min(INTERACTION_PENALTY_CAP),
    }
}

fn score_of(factors: &BurnoutFactors, kind: FactorKind) -> f64 {
    match kind {
        FactorKind::SleepDeficit => factors.sleep_deficit.score,
        FactorKind::HrvStress => factors.hrv_stress.score,
        FactorKind::WorkOverload => factors.work_overload.score,
        FactorKind::RecoveryDeficit => factors.recovery_deficit.score,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FactorScore;

    fn factors(sleep: f64, hrv: f64, work: f64, recovery: f64) -> BurnoutFactors {
        let make = |kind, score| FactorScore {
            kind,
            score,
            raw_value: 0.0,
            weight: 0.25,
        };
        BurnoutFactors {
            sleep_deficit: make(FactorKind::SleepDeficit, sleep),
            hrv_stress: make(FactorKind::HrvStress, hrv),
            work_overload: make(FactorKind::WorkOverload, work),
            recovery_deficit: make(FactorKind::RecoveryDeficit, recovery),
        }
    }

    #[test]
    fn no_pair_fires_below_high_threshold() {
        let outcome = evaluate(&factors(49.0, 49.0, 49.0, 49.0), &ThresholdConfig::default());
        assert!(outcome.effects.is_empty());
        assert!(outcome.total_penalty.abs() < 1e-9);
    }

    #[test]
    fn single_elevated_factor_never_fires() {
        let outcome = evaluate(&factors(95.0, 0.0, 0.0, 0.0), &ThresholdConfig::default());
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn maxed_factors_hit_the_cap_exactly() {
        let outcome = evaluate(
            &factors(100.0, 100.0, 100.0, 100.0),
            &ThresholdConfig::default(),
        );
        assert_eq!(outcome.effects.len(), 4);
        assert!((outcome.total_penalty - INTERACTION_PENALTY_CAP).abs() < 1e-9);
    }

    #[test]
    fn severity_tracks_the_critical_threshold() {
        let outcome = evaluate(&factors(85.0, 10.0, 60.0, 10.0), &ThresholdConfig::default());
        assert_eq!(outcome.effects.len(), 1);
        assert_eq!(outcome.effects[0].severity, InteractionSeverity::Elevated);

        let outcome = evaluate(&factors(85.0, 10.0, 80.0, 10.0), &ThresholdConfig::default());
        assert_eq!(outcome.effects[0].severity, InteractionSeverity::Critical);
    }

    #[test]
    fn geometric_mean_scales_the_excess() {
        let outcome = evaluate(&factors(84.0, 10.0, 100.0, 10.0), &ThresholdConfig::default());
        let expected = ((34.0f64) * 50.0).sqrt() * 0.30;
        assert!((outcome.total_penalty - expected).abs() < 1e-9);
    }

    #[test]
    fn disabled_flag_suppresses_everything() {
        let config = ThresholdConfig {
            interaction_effects_enabled: false,
            ..ThresholdConfig::default()
        };
        let outcome = evaluate(&factors(100.0, 100.0, 100.0, 100.0), &config);
        assert!(outcome.effects.is_empty());
        assert!(outcome.total_penalty.abs() < 1e-9);
    }
}
