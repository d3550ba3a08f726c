//! Assessment Integration Tests
//!
//! End-to-end behaviour of `CrisisAssessor`: scenarios, negation,
//! empty input, fail-safe fallback, idempotence and concurrent reuse.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use crisisguard::adapters::{KeywordSentimentSignal, SentimentSignal, SignalReading};
use crisisguard::core::{CrisisAssessor, EMPTY_INPUT_NOTICE, SIGNAL_CATEGORY};
use crisisguard::{CrisisAssessment, InterventionType, MoodContext, RiskLevel, UserHistory};

fn at_hour(hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 14, hour, 0, 0).unwrap()
}

fn assessor() -> CrisisAssessor {
    CrisisAssessor::new().unwrap()
}

fn has_category(assessment: &CrisisAssessment, category: &str) -> bool {
    assessment
        .crisis_indicators
        .iter()
        .any(|i| i.category == category)
}

/// Clear the fields that legitimately vary between otherwise identical calls
fn without_timing(mut assessment: CrisisAssessment) -> CrisisAssessment {
    assessment.assessment_metadata.processing_time_ms = 0.0;
    assessment
}

#[test]
fn test_pills_scenario_is_high_or_above() {
    let ctx = MoodContext::with_mood_score(2.0);
    let a = assessor().assess_at(
        "I want to die and I have pills ready, it's the only way out",
        Some(&ctx),
        None,
        at_hour(12),
    );

    assert!(a.crisis_indicators.len() >= 2);
    assert!(has_category(&a, "high_risk_ideation.suicide_ideation"));
    assert!(has_category(&a, "imminent_danger.method_specific"));
    assert!(has_category(&a, "high_risk_ideation.hopelessness_severe"));

    assert!(matches!(
        a.risk_level,
        RiskLevel::High | RiskLevel::Critical | RiskLevel::Imminent
    ));
    assert!(matches!(
        a.intervention_type,
        InterventionType::CrisisContact
            | InterventionType::EmergencyServices
            | InterventionType::ImmediateIntervention
    ));
    assert!(a.assessment_metadata.requires_human_review);
    assert!(a.risk_factors.contains(&"Very low mood score".to_string()));
}

#[test]
fn test_calm_scenario_is_minimal() {
    let a = assessor().assess_at("Feeling okay today, just a bit tired", None, None, at_hour(12));

    assert_eq!(a.risk_level, RiskLevel::Minimal);
    assert_eq!(a.intervention_type, InterventionType::None);
    assert_eq!(a.risk_score, 0.0);
    assert!(a.crisis_indicators.is_empty());
    assert_eq!(a.assessment_metadata.assessment_method, "multi_layered_analysis");
    assert!(a.assessment_metadata.error.is_none());
}

#[test]
fn test_imminent_override() {
    let a = assessor().assess_at("going to kill myself tonight", None, None, at_hour(12));

    assert_eq!(a.risk_level, RiskLevel::Imminent);
    assert_eq!(a.intervention_type, InterventionType::ImmediateIntervention);
    assert!(has_category(&a, "imminent_danger.suicide_explicit"));
    assert!(a
        .immediate_actions
        .iter()
        .any(|action| action.contains("Call 911")));
    assert!(a.resources_recommended.iter().any(|r| r.contact == "911"));
}

#[test]
fn test_negation_dampens_indicator() {
    let category = "high_risk_ideation.suicide_ideation";
    let plain = assessor().assess_at("I am suicidal", None, None, at_hour(12));
    let negated = assessor().assess_at("I am not suicidal", None, None, at_hour(12));

    let find = |a: &CrisisAssessment| {
        a.crisis_indicators
            .iter()
            .find(|i| i.category == category)
            .cloned()
            .unwrap()
    };
    let plain_ind = find(&plain);
    let negated_ind = find(&negated);

    assert!(negated_ind.severity < plain_ind.severity);
    assert!(negated_ind.confidence < plain_ind.confidence);
    assert!(negated.risk_score < plain.risk_score);
}

#[test]
fn test_word_ending_in_no_does_not_negate() {
    let casino = assessor().assess_at(
        "i lost everything at the casino and honestly i'm suicidal",
        None,
        None,
        at_hour(12),
    );
    let bar = assessor().assess_at(
        "i lost everything at the bar and honestly i'm suicidal",
        None,
        None,
        at_hour(12),
    );

    assert_eq!(casino.risk_score, bar.risk_score);
    assert_eq!(casino.risk_level, RiskLevel::Critical);
    assert_eq!(bar.risk_level, RiskLevel::Critical);
}

#[test]
fn test_empty_input() {
    for text in ["", "    ", "\n"] {
        let a = assessor().assess(text, None, None);
        assert_eq!(a.risk_level, RiskLevel::Minimal);
        assert_eq!(a.intervention_type, InterventionType::None);
        assert!(a.crisis_indicators.is_empty());
        assert_eq!(a.assessment_metadata.notice.as_deref(), Some(EMPTY_INPUT_NOTICE));
        assert_eq!(a.assessment_metadata.assessment_method, "minimal_default");
        assert!(!a.is_error());
    }
}

#[test]
fn test_internal_error_falls_back_to_minimal() {
    let ctx = MoodContext::with_mood_score(f64::NAN);
    let a = assessor().assess("I want to die", Some(&ctx), None);

    assert_eq!(a.risk_level, RiskLevel::Minimal);
    assert_eq!(a.intervention_type, InterventionType::None);
    assert!(a.crisis_indicators.is_empty());
    assert!(a.is_error());
    assert!(a
        .assessment_metadata
        .error
        .as_deref()
        .unwrap()
        .contains("mood_score"));

    // Fallback still points at the lifeline
    assert!(a.resources_recommended.iter().any(|r| r.contact == "988"));

    // Same failure is visible through the explicit result API
    assert!(assessor().try_assess("I want to die", Some(&ctx), None).is_err());
}

#[test]
fn test_idempotent() {
    let assessor = assessor();
    let ctx = MoodContext {
        mood_score: Some(3.0),
        emotions: vec!["hopeless".to_string()],
        recent_mood_decline: true,
    };
    let history = UserHistory {
        previous_attempts: 1,
        ..Default::default()
    };
    let text = "Everything is falling apart and nobody cares";

    let first = assessor.assess_at(text, Some(&ctx), Some(&history), at_hour(23));
    let second = assessor.assess_at(text, Some(&ctx), Some(&history), at_hour(23));

    assert_eq!(without_timing(first), without_timing(second));
}

#[test]
fn test_protective_factors_do_not_lower_score() {
    let at = at_hour(12);
    let without = assessor().assess_at("i feel hopeless", None, None, at);
    let with = assessor().assess_at("i feel hopeless but my family is there for me", None, None, at);

    assert!(!with.protective_factors.is_empty());
    assert!(without.protective_factors.is_empty());
    assert_eq!(with.risk_score, without.risk_score);
    assert_eq!(with.risk_level, without.risk_level);
}

#[test]
fn test_late_night_risk_factor() {
    let text = "can't sleep again";
    let night = assessor().assess_at(text, None, None, at_hour(2));
    let day = assessor().assess_at(text, None, None, at_hour(15));

    assert!(night
        .risk_factors
        .contains(&"Late night/early morning timing".to_string()));
    assert!(day.risk_factors.is_empty());
}

#[test]
fn test_summary_top_indicators() {
    let a = assessor().assess_at(
        "I want to die and I have pills ready, it's the only way out",
        None,
        None,
        at_hour(12),
    );
    let summary = a.summary();

    assert_eq!(summary.indicators_count, a.crisis_indicators.len());
    assert!(summary.top_risk_indicators.len() <= 3);
    assert_eq!(
        summary.top_risk_indicators[0].category,
        a.crisis_indicators[0].category
    );
    assert_eq!(
        summary.emergency_contacts_needed,
        a.intervention_type.needs_emergency_contacts()
    );
}

#[test]
fn test_assessment_json_shape() {
    let a = assessor().assess_at("going to kill myself tonight", None, None, at_hour(12));
    let json = serde_json::to_value(&a).unwrap();

    assert_eq!(json["risk_level"], "imminent");
    assert_eq!(json["intervention_type"], "immediate_intervention");
    assert_eq!(json["crisis_indicators"][0]["urgency_level"], "immediate");
    assert!(json["resources_recommended"][0]["type"].is_string());
    assert!(json["assessment_metadata"].get("error").is_none());
}

struct FailingSignal;

#[async_trait]
impl SentimentSignal for FailingSignal {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyse(&self, _text: &str) -> anyhow::Result<Option<SignalReading>> {
        Err(anyhow!("model unavailable"))
    }
}

#[tokio::test]
async fn test_signal_adds_indicator() {
    let text = "I want to die, everything is hopeless";
    let a = assessor()
        .assess_with_signal(text, None, None, &KeywordSentimentSignal::new())
        .await;

    let signal = a
        .crisis_indicators
        .iter()
        .find(|i| i.category == SIGNAL_CATEGORY)
        .unwrap();
    assert_eq!(signal.confidence, 0.7);
    assert!(signal.severity > 0.3);
}

#[tokio::test]
async fn test_failing_signal_is_ignored() {
    let text = "I want to die, everything is hopeless";
    let plain = assessor().assess(text, None, None);
    let signalled = assessor()
        .assess_with_signal(text, None, None, &FailingSignal)
        .await;

    assert!(!signalled.is_error());
    assert_eq!(signalled.crisis_indicators, plain.crisis_indicators);
    assert_eq!(signalled.risk_score, plain.risk_score);
}

#[tokio::test]
async fn test_shared_assessor_across_tasks() {
    let assessor = Arc::new(assessor());
    let texts = [
        "I want to die and I have pills ready, it's the only way out",
        "Feeling okay today, just a bit tired",
        "going to kill myself tonight",
        "I don't want to see anyone",
    ];
    let at = at_hour(12);

    let expected: Vec<_> = texts
        .iter()
        .map(|t| without_timing(assessor.assess_at(t, None, None, at)))
        .collect();

    let mut handles = Vec::new();
    for round in 0..8 {
        for (i, text) in texts.iter().enumerate() {
            let assessor = Arc::clone(&assessor);
            let text = text.to_string();
            handles.push(tokio::spawn(async move {
                (i, round, assessor.assess_at(&text, None, None, at))
            }));
        }
    }

    for handle in handles {
        let (i, _round, assessment) = handle.await.unwrap();
        assert_eq!(without_timing(assessment), expected[i]);
    }
}
