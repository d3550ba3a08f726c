//! The crisis assessor: detection, scoring and response in one pass.
//!
//! `assess` never fails. Empty input yields a minimal assessment with a
//! notice; internal failures yield a minimal assessment with
//! `metadata.error` set and are logged at `error`. Callers that want the
//! failure itself use `try_assess`.

use std::time::Instant;

use chrono::{DateTime, Local, Timelike, Utc};
use tracing::{debug, error, instrument, warn};

use super::error::AssessmentError;
use super::factors::{protective_factors, risk_factors};
use super::guidance::{immediate_actions, recommended_resources};
use super::scoring::{base_risk_score, classify_risk, RiskScorer};
use super::settings::AssessorSettings;
use crate::adapters::{SentimentSignal, SignalReading};
use crate::detect::{deduplicate, normalize, rank, Detectors};
use crate::domain::{
    AssessmentMetadata, CrisisAssessment, CrisisIndicator, MoodContext, RiskLevel, Urgency,
    UserHistory,
};

pub const METHOD_MULTI_LAYERED: &str = "multi_layered_analysis";
pub const METHOD_MINIMAL: &str = "minimal_default";
pub const EMPTY_INPUT_NOTICE: &str = "Empty or invalid input";

/// Category given to a sentiment-signal indicator
pub const SIGNAL_CATEGORY: &str = "ai_sentiment_crisis";

/// Readings at or below this score are ignored
const SIGNAL_MIN_SCORE: f64 = 0.3;
const SIGNAL_CONFIDENCE: f64 = 0.7;

/// Text after truncation and normalisation
struct PreparedText {
    text: String,
    truncated: bool,
}

impl PreparedText {
    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Stateless crisis risk assessor
///
/// Construct once and share; every method takes `&self` and the compiled
/// detectors are immutable, so one instance serves concurrent callers.
#[derive(Debug)]
pub struct CrisisAssessor {
    settings: AssessorSettings,
    detectors: Detectors,
    scorer: RiskScorer,
}

impl CrisisAssessor {
    /// Create an assessor with default settings
    pub fn new() -> Result<Self, AssessmentError> {
        Self::with_settings(AssessorSettings::default())
    }

    pub fn with_settings(settings: AssessorSettings) -> Result<Self, AssessmentError> {
        settings.validate()?;
        Ok(Self {
            detectors: Detectors::new(settings.negation_window_chars)?,
            scorer: RiskScorer::new()?,
            settings,
        })
    }

    pub fn settings(&self) -> &AssessorSettings {
        &self.settings
    }

    /// Assess text at the current local time
    pub fn assess(
        &self,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
    ) -> CrisisAssessment {
        self.assess_at(text, context, history, Local::now())
    }

    /// Assess text as of `now`; the hour drives the late-night risk factor
    pub fn assess_at(
        &self,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
        now: DateTime<Local>,
    ) -> CrisisAssessment {
        let started = Instant::now();
        let prepared = self.prepare(text);
        self.evaluate(&prepared, context, history, now, started, None)
            .unwrap_or_else(|e| fallback(&prepared, e, started, now))
    }

    /// Like `assess`, but internal failures are returned instead of absorbed
    pub fn try_assess(
        &self,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
    ) -> Result<CrisisAssessment, AssessmentError> {
        self.try_assess_at(text, context, history, Local::now())
    }

    pub fn try_assess_at(
        &self,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
        now: DateTime<Local>,
    ) -> Result<CrisisAssessment, AssessmentError> {
        let started = Instant::now();
        let prepared = self.prepare(text);
        self.evaluate(&prepared, context, history, now, started, None)
    }

    /// Assess text, also consulting an external sentiment signal
    ///
    /// A failing signal is logged and contributes nothing.
    pub async fn assess_with_signal(
        &self,
        text: &str,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
        signal: &dyn SentimentSignal,
    ) -> CrisisAssessment {
        let now = Local::now();
        let started = Instant::now();
        let prepared = self.prepare(text);

        let reading = if prepared.text.is_empty() {
            None
        } else {
            match signal.analyse(&prepared.text).await {
                Ok(reading) => reading,
                Err(e) => {
                    warn!(signal = signal.name(), error = %e, "Sentiment signal failed, ignoring");
                    None
                }
            }
        };

        self.evaluate(&prepared, context, history, now, started, reading.as_ref())
            .unwrap_or_else(|e| fallback(&prepared, e, started, now))
    }

    fn prepare(&self, text: &str) -> PreparedText {
        let (kept, truncated) = truncate_on_char_boundary(text, self.settings.max_text_bytes);
        PreparedText {
            text: normalize(kept),
            truncated,
        }
    }

    #[instrument(skip_all, fields(text_len = input.text.len()))]
    fn evaluate(
        &self,
        input: &PreparedText,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
        now: DateTime<Local>,
        started: Instant,
        reading: Option<&SignalReading>,
    ) -> Result<CrisisAssessment, AssessmentError> {
        if input.text.is_empty() {
            debug!("Empty input, returning minimal assessment");
            let mut assessment = minimal_assessment(0, started, now);
            assessment.assessment_metadata.notice = Some(EMPTY_INPUT_NOTICE.to_string());
            return Ok(assessment);
        }

        validate_context(context)?;

        let mut indicators = self.detectors.detect(&input.text);
        if let Some(indicator) = reading.and_then(signal_indicator) {
            indicators.push(indicator);
            indicators = rank(deduplicate(indicators));
        }

        if let Some(bad) = indicators.iter().find(|i| !i.is_finite()) {
            return Err(AssessmentError::Detector {
                category: bad.category.clone(),
            });
        }

        let base_score = base_risk_score(&indicators);
        let risk_score = self
            .scorer
            .adjust(base_score, &input.text, context, history)?;
        let risk_level = classify_risk(risk_score, &indicators);
        let intervention_type = risk_level.intervention();

        let protective = protective_factors(&input.text);
        let risks = risk_factors(context, history, now.hour(), &self.settings);

        debug!(
            indicators = indicators.len(),
            base_score,
            risk_score,
            level = %risk_level,
            "Assessment pass complete"
        );

        if risk_level >= RiskLevel::High {
            warn!(
                level = %risk_level,
                risk_score,
                categories = ?indicators.iter().map(|i| i.category.as_str()).collect::<Vec<_>>(),
                "Elevated crisis risk detected"
            );
        }

        let requires_human_review = risk_score >= self.settings.human_review_threshold
            || risk_level.requires_immediate_intervention();

        let metadata = AssessmentMetadata {
            processing_time_ms: elapsed_ms(started),
            text_length: input.char_len(),
            indicators_found: indicators.len(),
            protective_factors_count: protective.len(),
            risk_factors_count: risks.len(),
            assessment_method: METHOD_MULTI_LAYERED.to_string(),
            timestamp: now.with_timezone(&Utc),
            requires_human_review,
            truncated: input.truncated,
            notice: None,
            error: None,
        };

        Ok(CrisisAssessment {
            risk_level,
            risk_score,
            intervention_type,
            crisis_indicators: indicators,
            protective_factors: protective,
            risk_factors: risks,
            immediate_actions: immediate_actions(risk_level),
            resources_recommended: recommended_resources(risk_level),
            assessment_metadata: metadata,
        })
    }
}

fn validate_context(context: Option<&MoodContext>) -> Result<(), AssessmentError> {
    if let Some(mood) = context.and_then(|c| c.mood_score) {
        if !mood.is_finite() {
            return Err(AssessmentError::InvalidContext(format!(
                "mood_score must be a finite number, got {}",
                mood
            )));
        }
    }
    Ok(())
}

/// Turn a sentiment reading into an indicator when it clears the threshold
fn signal_indicator(reading: &SignalReading) -> Option<CrisisIndicator> {
    if reading.risk_score.is_nan() || reading.risk_score <= SIGNAL_MIN_SCORE {
        return None;
    }

    let urgency = match reading.risk_level {
        RiskLevel::Imminent | RiskLevel::Critical => Urgency::Immediate,
        RiskLevel::High => Urgency::High,
        RiskLevel::Medium => Urgency::Medium,
        RiskLevel::Low | RiskLevel::Minimal => Urgency::Low,
    };

    Some(CrisisIndicator::new(
        SIGNAL_CATEGORY,
        reading.risk_score.min(1.0),
        reading.indicators.clone(),
        "ai_sentiment_analysis",
        SIGNAL_CONFIDENCE,
        urgency,
    ))
}

fn truncate_on_char_boundary(text: &str, max_bytes: usize) -> (&str, bool) {
    if text.len() <= max_bytes {
        return (text, false);
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// A well-formed minimal-risk assessment
fn minimal_assessment(text_length: usize, started: Instant, now: DateTime<Local>) -> CrisisAssessment {
    let level = RiskLevel::Minimal;
    CrisisAssessment {
        risk_level: level,
        risk_score: 0.0,
        intervention_type: level.intervention(),
        crisis_indicators: Vec::new(),
        protective_factors: Vec::new(),
        risk_factors: Vec::new(),
        immediate_actions: immediate_actions(level),
        resources_recommended: recommended_resources(level),
        assessment_metadata: AssessmentMetadata {
            processing_time_ms: elapsed_ms(started),
            text_length,
            indicators_found: 0,
            protective_factors_count: 0,
            risk_factors_count: 0,
            assessment_method: METHOD_MINIMAL.to_string(),
            timestamp: now.with_timezone(&Utc),
            requires_human_review: false,
            truncated: false,
            notice: None,
            error: None,
        },
    }
}

fn fallback(
    input: &PreparedText,
    err: AssessmentError,
    started: Instant,
    now: DateTime<Local>,
) -> CrisisAssessment {
    error!(error = %err, text_len = input.text.len(), "Crisis assessment failed, returning minimal-risk fallback");
    let mut assessment = minimal_assessment(input.char_len(), started, now);
    assessment.assessment_metadata.truncated = input.truncated;
    assessment.assessment_metadata.error = Some(err.to_string());
    assessment
}
