//! Scoring Integration Tests
//!
//! Monotonicity, score bounds, level/intervention consistency and
//! contextual adjustments.

use chrono::{Local, TimeZone};
use crisisguard::core::{base_risk_score, classify_risk, CrisisAssessor, RiskScorer};
use crisisguard::{CrisisIndicator, MoodContext, RiskLevel, Urgency, UserHistory};

fn indicator(category: &str, severity: f64, confidence: f64, urgency: Urgency) -> CrisisIndicator {
    CrisisIndicator::new(category, severity, Vec::new(), "", confidence, urgency)
}

#[test]
fn test_monotonic_when_adding_stronger_indicators() {
    let a = vec![indicator("a", 0.5, 0.4, Urgency::Medium)];
    let scenarios = [
        vec![indicator("b", 0.5, 0.4, Urgency::Medium)],
        vec![indicator("b", 0.7, 0.1, Urgency::Low)],
        vec![
            indicator("b", 0.6, 0.9, Urgency::High),
            indicator("c", 0.9, 0.5, Urgency::Immediate),
        ],
    ];

    let base_a = base_risk_score(&a);
    for extra in scenarios {
        let mut b = a.clone();
        b.extend(extra);
        assert!(
            base_risk_score(&b) >= base_a,
            "adding {:?} lowered the score",
            b
        );
    }
}

#[test]
fn test_monotonic_end_to_end() {
    let assessor = CrisisAssessor::new().unwrap();
    let at = Local.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap();

    let fewer = assessor.assess_at("i feel hopeless", None, None, at);
    let more = assessor.assess_at("i feel hopeless and i want to die", None, None, at);

    assert!(more.crisis_indicators.len() > fewer.crisis_indicators.len());
    assert!(more.risk_score >= fewer.risk_score);
}

#[test]
fn test_score_always_bounded() {
    let assessor = CrisisAssessor::new().unwrap();
    let ctx = MoodContext {
        mood_score: Some(1.0),
        emotions: vec!["desperate".to_string(), "trapped".to_string()],
        recent_mood_decline: true,
    };
    let history = UserHistory {
        previous_attempts: 3,
        previous_crisis_incidents: 5,
        crisis_incidents_last_month: 4,
        recent_major_loss: true,
        substance_abuse_history: true,
    };

    let texts = [
        "",
        "hello",
        "going to kill myself tonight with pills from the bridge, this is goodbye",
        "i'm drunk and i have a plan, i know how and where, rope ready, gun loaded",
        "not suicidal, never, no, nothing",
        "hopeless worthless useless failure mistake burden to everyone",
    ];

    for text in texts {
        for (c, h) in [(None, None), (Some(&ctx), Some(&history))] {
            let a = assessor.assess(text, c, h);
            assert!(
                (0.0..=1.0).contains(&a.risk_score),
                "score {} out of range for {:?}",
                a.risk_score,
                text
            );
        }
    }
}

#[test]
fn test_intervention_follows_level() {
    let assessor = CrisisAssessor::new().unwrap();
    let texts = [
        "Feeling okay today, just a bit tired",
        "i'm not avoiding contact",
        "I don't want to see anyone",
        "i feel hopeless",
        "going to kill myself tonight",
        "everything is getting worse and i can't cope",
    ];

    for text in texts {
        let a = assessor.assess(text, None, None);
        assert_eq!(
            a.intervention_type,
            a.risk_level.intervention(),
            "inconsistent intervention for {:?}",
            text
        );
    }
}

#[test]
fn test_level_tiers_from_text() {
    let assessor = CrisisAssessor::new().unwrap();
    let level = |text: &str| assessor.assess(text, None, None).risk_level;

    assert_eq!(level("Feeling okay today, just a bit tired"), RiskLevel::Minimal);
    // negated withdrawal: 0.2 + 0.05
    assert_eq!(level("i'm not avoiding contact"), RiskLevel::Low);
    // withdrawal: 0.4 + 0.05 * 1.1
    assert_eq!(level("I don't want to see anyone"), RiskLevel::Medium);
    // hopelessness: 0.75 + 0.05 * 1.3
    assert_eq!(level("i feel hopeless"), RiskLevel::Critical);
}

#[test]
fn test_context_raises_score() {
    let scorer = RiskScorer::new().unwrap();
    let base = 0.4;
    let plain = scorer.adjust(base, "", None, None).unwrap();

    let low_mood = MoodContext::with_mood_score(4.0);
    let history = UserHistory {
        previous_attempts: 1,
        ..Default::default()
    };

    let adjusted = scorer
        .adjust(base, "", Some(&low_mood), Some(&history))
        .unwrap();
    assert!(adjusted > plain);
    // 0.4 * 1.1 * 1.4
    assert_eq!(adjusted, 0.616);
}

#[test]
fn test_classify_override_only_for_imminent_categories() {
    let method = indicator("imminent_danger.method_specific", 0.9, 0.1, Urgency::Immediate);
    assert_eq!(classify_risk(0.5, &[method]), RiskLevel::Medium);

    let harm = indicator("imminent_danger.self_harm_immediate", 0.95, 0.1, Urgency::Immediate);
    assert_eq!(classify_risk(0.5, &[harm]), RiskLevel::Imminent);
}
