//! Risk scoring: indicator aggregation and contextual adjustment.

use regex::Regex;

use super::error::AssessmentError;
use crate::detect::IMMINENT_CATEGORIES;
use crate::domain::{CrisisIndicator, MoodContext, RiskLevel, UserHistory};

/// Bonus per indicator before the urgency multiplier
const INDICATOR_BONUS_STEP: f64 = 0.05;

/// Ceiling on the indicator-count bonus
const INDICATOR_BONUS_CAP: f64 = 0.2;

const SUBSTANCE_PATTERN: &str = r"\b(?:drunk|high|pills|alcohol|drugs)\b";
const PLAN_PATTERN: &str = r"\b(?:plan|method|when|how|where)\b";

/// Round to three decimals
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Confidence-weighted mean severity plus an urgency-scaled count bonus
pub fn base_risk_score(indicators: &[CrisisIndicator]) -> f64 {
    if indicators.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = indicators.iter().map(|i| i.confidence).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = indicators.iter().map(|i| i.weighted_severity()).sum();
    let base = weighted / total_weight;

    let bonus = (indicators.len() as f64 * INDICATOR_BONUS_STEP).min(INDICATOR_BONUS_CAP);
    let max_urgency = indicators
        .iter()
        .map(|i| i.urgency_level.multiplier())
        .fold(1.0, f64::max);

    round3((base + bonus * max_urgency).min(1.0))
}

/// Final level: score thresholds, overridden by explicit imminent categories
pub fn classify_risk(score: f64, indicators: &[CrisisIndicator]) -> RiskLevel {
    let has_imminent = indicators
        .iter()
        .any(|i| IMMINENT_CATEGORIES.contains(&i.category.as_str()));

    if has_imminent {
        RiskLevel::Imminent
    } else {
        RiskLevel::from_score(score)
    }
}

/// Applies context, history and text-specific multipliers to a base score
#[derive(Debug, Clone)]
pub struct RiskScorer {
    substance: Regex,
    plan: Regex,
}

impl RiskScorer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            substance: Regex::new(SUBSTANCE_PATTERN)?,
            plan: Regex::new(PLAN_PATTERN)?,
        })
    }

    /// Multiply the base score by each applicable factor; capped at 1.0
    pub fn adjust(
        &self,
        base_score: f64,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
    ) -> Result<f64, AssessmentError> {
        let mut score = base_score;

        if let Some(ctx) = context {
            if let Some(mood) = ctx.mood_score {
                if mood <= 2.0 {
                    score *= 1.3;
                } else if mood <= 4.0 {
                    score *= 1.1;
                }
            }
            if ctx.recent_mood_decline {
                score *= 1.2;
            }
        }

        if let Some(history) = history {
            if history.previous_attempts > 0 {
                score *= 1.4;
            }
            if history.crisis_incidents_last_month > 2 {
                score *= 1.2;
            }
        }

        if self.substance.is_match(text) {
            score *= 1.3;
        }

        if self.plan.is_match(text) {
            score *= 1.4;
        }

        if !score.is_finite() {
            return Err(AssessmentError::Scoring(format!(
                "non-finite score from base {}",
                base_score
            )));
        }

        Ok(round3(score.clamp(0.0, 1.0)))
    }
}
