use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::context::{ContextAdjustment, VacationFatigue};
use crate::factors::{BurnoutFactors, FactorKind, FactorScore, ReadinessFactors};
use crate::interactions::InteractionOutcome;
use crate::models::{Chronotype, SocialEnergy, Zone};
use crate::settings::EffectiveSettings;

const MAX_RANKED_FACTORS: usize = 4;
const MAX_RECOMMENDATIONS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Elevated,
    Moderate,
    Positive,
}

impl Impact {
    fn from_score(kind: FactorKind, score: f64) -> Self {
        // Burnout-side factors read high-is-bad; readiness-side the reverse.
        let concern = if kind.is_burnout_side() {
            score
        } else {
            100.0 - score
        };
        if concern >= 70.0 {
            Self::High
        } else if concern >= 50.0 {
            Self::Elevated
        } else if concern <= 30.0 {
            Self::Positive
        } else {
            Self::Moderate
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedFactor {
    pub kind: FactorKind,
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub impact: Impact,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub ranked_factors: Vec<RankedFactor>,
    pub personal_recommendations: Vec<String>,
    pub leadership_recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactions: Option<InteractionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<VacationFatigue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextAdjustment>,
}

pub struct ExplanationInputs<'a> {
    pub burnout: &'a BurnoutFactors,
    pub readiness: &'a ReadinessFactors,
    pub interactions: &'a InteractionOutcome,
    pub fatigue: &'a VacationFatigue,
    pub calibration: &'a Calibration,
    pub context: Option<&'a ContextAdjustment>,
    pub zone: Zone,
    pub settings: &'a EffectiveSettings,
}

pub fn build(inputs: &ExplanationInputs<'_>) -> Explanation {
    let ranked_factors = rank_factors(inputs.burnout, inputs.readiness, inputs.settings);
    Explanation {
        personal_recommendations: personal_recommendations(inputs, &ranked_factors),
        leadership_recommendations: leadership_recommendations(inputs, &ranked_factors),
        ranked_factors,
        interactions: (!inputs.interactions.effects.is_empty())
            .then(|| inputs.interactions.clone()),
        fatigue: (inputs.fatigue.penalty > 0.0 || inputs.fatigue.needs_break)
            .then(|| inputs.fatigue.clone()),
        calibration: (!inputs.calibration.is_neutral()).then(|| inputs.calibration.clone()),
        context: inputs.context.cloned(),
    }
}

fn impact_value(factor: &FactorScore) -> f64 {
    (factor.score - 50.0).abs() * factor.weight
}

/// Merges both factor sides, keeps the higher-impact read of each physical
/// signal, and emits the top four ranked by distance-from-neutral times
/// weight.
fn rank_factors(
    burnout: &BurnoutFactors,
    readiness: &ReadinessFactors,
    settings: &EffectiveSettings,
) -> Vec<RankedFactor> {
    let mut merged: Vec<FactorScore> = Vec::new();
    for candidate in burnout.all().into_iter().chain(readiness.all()) {
        match merged
            .iter_mut()
            .find(|kept| kept.kind.signal() == candidate.kind.signal())
        {
            Some(kept) if impact_value(&candidate) > impact_value(kept) => *kept = candidate,
            Some(_) => {}
            None => merged.push(candidate),
        }
    }

    merged.sort_by(|a, b| {
        impact_value(b)
            .partial_cmp(&impact_value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    merged
        .into_iter()
        .take(MAX_RANKED_FACTORS)
        .map(|factor| {
            let impact = Impact::from_score(factor.kind, factor.score);
            RankedFactor {
                kind: factor.kind,
                label: factor.kind.label().to_string(),
                score: factor.score,
                weight: factor.weight,
                impact,
                value: render_value(factor.kind, factor.raw_value),
                description: describe(factor.kind, impact, settings.has_active_life_event()),
            }
        })
        .collect()
}

fn render_value(kind: FactorKind, raw: f64) -> String {
    match kind {
        FactorKind::SleepDeficit => format!("{raw:.1}h slept"),
        FactorKind::HrvStress | FactorKind::HrvRecovery => format!("{raw:.0} ms HRV"),
        FactorKind::WorkOverload | FactorKind::WorkLifeBalance => format!("{raw:.1}h worked"),
        FactorKind::RecoveryDeficit => format!("recovery {raw:.0}/100"),
        FactorKind::SleepQuality => format!("quality {raw:.0}/100"),
        FactorKind::ActivityLevel => format!("{raw:.0} min active"),
    }
}

fn describe(kind: FactorKind, impact: Impact, has_active_life_event: bool) -> String {
    let base = match kind {
        FactorKind::SleepDeficit => match impact {
            Impact::High => "Sleep fell well short of your adjusted expectation.",
            Impact::Elevated => "Sleep came in below your adjusted expectation.",
            Impact::Moderate => "Sleep was slightly under expectation.",
            Impact::Positive => "Sleep met your expectation.",
        },
        FactorKind::HrvStress => match impact {
            Impact::High => "Heart-rate variability is far below your baseline, a strong physiological stress signal.",
            Impact::Elevated => "Heart-rate variability is below baseline, suggesting elevated stress.",
            Impact::Moderate => "Heart-rate variability is a little below baseline.",
            Impact::Positive => "Heart-rate signals look calm relative to baseline.",
        },
        FactorKind::WorkOverload => match impact {
            Impact::High => "Hours worked ran far past your expectation, with overtime or meeting overrun on top.",
            Impact::Elevated => "The working day ran noticeably longer than expected.",
            Impact::Moderate => "Workload was somewhat above expectation.",
            Impact::Positive => "Workload stayed within your expectation.",
        },
        FactorKind::RecoveryDeficit => match impact {
            Impact::High => "Deep sleep and recovery score point to poor overnight restoration.",
            Impact::Elevated => "Overnight recovery was incomplete.",
            Impact::Moderate => "Recovery was a touch below where it should be.",
            Impact::Positive => "Overnight recovery looks solid.",
        },
        FactorKind::SleepQuality => match impact {
            Impact::High => "Sleep quality and duration were both poor.",
            Impact::Elevated => "Sleep quality dragged readiness down.",
            Impact::Moderate => "Sleep quality was middling.",
            Impact::Positive => "Sleep quality is supporting your readiness.",
        },
        FactorKind::HrvRecovery => match impact {
            Impact::High => "Cardiac recovery signals are weak today.",
            Impact::Elevated => "Cardiac recovery is below where it usually sits.",
            Impact::Moderate => "Cardiac recovery is around baseline.",
            Impact::Positive => "Cardiac recovery signals are strong.",
        },
        FactorKind::WorkLifeBalance => match impact {
            Impact::High => "Work hours crowded out everything else.",
            Impact::Elevated => "Work-life balance tilted toward work.",
            Impact::Moderate => "Work-life balance was acceptable.",
            Impact::Positive => "Work stayed within healthy bounds.",
        },
        FactorKind::ActivityLevel => match impact {
            Impact::High => "Activity was far outside your optimal range.",
            Impact::Elevated => "Activity was outside your optimal range.",
            Impact::Moderate => "Activity was near the edge of your optimal range.",
            Impact::Positive => "Activity sat inside your optimal range.",
        },
    };

    let event_note = matches!(
        kind,
        FactorKind::SleepDeficit | FactorKind::WorkOverload | FactorKind::SleepQuality
    ) && has_active_life_event
        && !matches!(impact, Impact::Positive);

    if event_note {
        format!("{base} Expectations are already adjusted for your active life events.")
    } else {
        base.to_string()
    }
}

fn factor_concern(ranked: &[RankedFactor], kind: FactorKind) -> bool {
    ranked
        .iter()
        .any(|f| f.kind == kind && matches!(f.impact, Impact::High | Impact::Elevated))
}

fn personal_recommendations(
    inputs: &ExplanationInputs<'_>,
    ranked: &[RankedFactor],
) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();
    let settings = inputs.settings;

    match inputs.zone {
        Zone::Red => {
            recs.push("Treat today as a recovery day: cut non-essential commitments.".to_string());
            if factor_concern(ranked, FactorKind::SleepDeficit) {
                recs.push("Protect a full sleep window tonight; aim for your adjusted target.".to_string());
            }
            if factor_concern(ranked, FactorKind::WorkOverload) {
                recs.push("Hand off or defer at least one deliverable this week.".to_string());
            }
            if factor_concern(ranked, FactorKind::HrvStress) {
                recs.push("Swap intense exercise for a walk or breathing practice until HRV recovers.".to_string());
            }
        }
        Zone::Yellow => {
            recs.push("Watch your trend this week; small corrections now prevent a red week.".to_string());
            if factor_concern(ranked, FactorKind::SleepDeficit)
                || factor_concern(ranked, FactorKind::SleepQuality)
            {
                recs.push("Bring bedtime forward by 30 minutes for the next few nights.".to_string());
            }
            if factor_concern(ranked, FactorKind::WorkOverload) {
                recs.push("Time-box tomorrow's work day and end on schedule.".to_string());
            }
        }
        Zone::Green => {
            recs.push("You're in a good place; keep the routines that got you here.".to_string());
            recs.push("Use today's capacity for the demanding work you've been deferring.".to_string());
        }
    }

    match settings.chronotype {
        Some(Chronotype::NightOwl) if inputs.zone != Zone::Green => {
            recs.push("Schedule deep-focus work for your later peak hours and keep mornings light.".to_string());
        }
        Some(Chronotype::EarlyBird) if inputs.zone != Zone::Green => {
            recs.push("Front-load demanding work into your morning peak and wind down early.".to_string());
        }
        _ => {}
    }

    if settings.social_energy == Some(SocialEnergy::Introvert) && inputs.zone != Zone::Green {
        recs.push("Decline optional meetings; recharge with solo focus time.".to_string());
    }

    if inputs.fatigue.needs_break {
        recs.push(format!(
            "It has been {} days since a strong recovery day. Plan real time off.",
            inputs.fatigue.days_since_recovery
        ));
    }

    if settings.has_active_life_event() && inputs.zone != Zone::Green {
        recs.push(
            "Your targets are adjusted for what's going on in your life; don't measure yourself against normal weeks."
                .to_string(),
        );
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

fn leadership_recommendations(
    inputs: &ExplanationInputs<'_>,
    ranked: &[RankedFactor],
) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();

    match inputs.zone {
        Zone::Red => {
            recs.push("Check in one-on-one this week; ask about workload before assigning more.".to_string());
            if factor_concern(ranked, FactorKind::WorkOverload) {
                recs.push("Reduce their meeting load and review deadline pressure.".to_string());
            }
            if !inputs.interactions.effects.is_empty() {
                recs.push("Multiple stress signals are compounding; treat this as urgent, not a bad day.".to_string());
            }
        }
        Zone::Yellow => {
            recs.push("Keep an eye on this person's trend; avoid adding scope this week.".to_string());
        }
        Zone::Green => {
            recs.push("Good time for stretch work or new responsibility.".to_string());
        }
    }

    if inputs.fatigue.needs_break {
        recs.push("Encourage them to book leave; there has been no strong recovery day in over three weeks.".to_string());
    }

    if inputs.settings.has_active_life_event() {
        recs.push(format!(
            "Account for active life events ({}) when planning their workload.",
            inputs.settings.active_event_labels.join(", ")
        ));
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}
