//! Phrase-set detectors for subtext: final arrangements, social closure
//! and pain-escape language.

use crate::domain::{CrisisIndicator, Urgency};

struct PhraseSet {
    category: &'static str,
    phrases: &'static [&'static str],
    severity: f64,
    confidence: f64,
    urgency: Urgency,
    context: &'static str,
}

static PHRASE_SETS: [PhraseSet; 3] = [
    PhraseSet {
        category: "contextual.final_arrangements",
        phrases: &[
            "saying goodbye",
            "last message",
            "final words",
            "goodbye letter",
            "will and testament",
            "take care of",
            "look after",
            "remember me",
        ],
        severity: 0.85,
        confidence: 0.8,
        urgency: Urgency::High,
        context: "contextual_language",
    },
    PhraseSet {
        category: "contextual.social_closure",
        phrases: &[
            "won't see you again",
            "this is goodbye",
            "last time talking",
            "forgive me",
            "sorry for everything",
            "it's not your fault",
        ],
        severity: 0.9,
        confidence: 0.85,
        urgency: Urgency::Immediate,
        context: "closure_language",
    },
    PhraseSet {
        category: "contextual.pain_escape",
        phrases: &[
            "end the pain",
            "stop the hurt",
            "make it stop",
            "can't bear",
            "unbearable",
            "too painful",
            "suffering too much",
        ],
        severity: 0.7,
        confidence: 0.7,
        urgency: Urgency::High,
        context: "pain_language",
    },
];

/// One indicator per phrase set with at least one phrase present
pub fn detect_contextual(text: &str) -> Vec<CrisisIndicator> {
    PHRASE_SETS
        .iter()
        .filter_map(|set| {
            let found: Vec<String> = set
                .phrases
                .iter()
                .filter(|p| text.contains(**p))
                .map(|p| p.to_string())
                .collect();

            if found.is_empty() {
                return None;
            }

            Some(CrisisIndicator::new(
                set.category,
                set.severity,
                found,
                set.context,
                set.confidence,
                set.urgency,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_closure_is_immediate() {
        let indicators = detect_contextual("please forgive me, this is goodbye");
        assert_eq!(indicators.len(), 1);
        let closure = &indicators[0];
        assert_eq!(closure.category, "contextual.social_closure");
        assert_eq!(closure.urgency_level, Urgency::Immediate);
        assert_eq!(closure.keywords_found, vec!["this is goodbye", "forgive me"]);
    }

    #[test]
    fn test_pain_escape() {
        let indicators = detect_contextual("i just want to make it stop, it's unbearable");
        assert_eq!(indicators[0].category, "contextual.pain_escape");
        assert_eq!(indicators[0].keywords_found.len(), 2);
    }

    #[test]
    fn test_benign_text() {
        assert!(detect_contextual("had a nice walk with the dog").is_empty());
    }
}
