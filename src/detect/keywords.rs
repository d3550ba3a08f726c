//! Keyword matching against the crisis taxonomy.
//!
//! Matching is case-insensitive substring containment on normalised text.
//! A leaf emits at most one indicator however many of its keywords hit.

use regex::Regex;

use super::taxonomy::{TaxonomyEntry, CRISIS_TAXONOMY};
use super::text::{back_chars, keyword_context};
use crate::domain::CrisisIndicator;

/// Default number of characters scanned before a keyword for negation
pub const DEFAULT_NEGATION_WINDOW: usize = 20;

const NEGATION_PATTERN: &str =
    r"\b(?:not|never|no|nothing|nowhere|nobody|none|don't|won't|can't)\b";

/// Confidence multiplier for a negated match
const NEGATED_CONFIDENCE_FACTOR: f64 = 0.3;

/// Severity multiplier for a negated match
const NEGATED_SEVERITY_FACTOR: f64 = 0.5;

/// Matches text against the taxonomy and scores each hit leaf
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    negation: Regex,
    negation_window: usize,
}

impl KeywordMatcher {
    pub fn new(negation_window: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            negation: Regex::new(NEGATION_PATTERN)?,
            negation_window,
        })
    }

    /// One indicator per taxonomy leaf with at least one match
    pub fn detect(&self, text: &str) -> Vec<CrisisIndicator> {
        CRISIS_TAXONOMY
            .iter()
            .filter_map(|entry| self.match_entry(text, entry))
            .collect()
    }

    fn match_entry(&self, text: &str, entry: &TaxonomyEntry) -> Option<CrisisIndicator> {
        let found: Vec<&str> = entry
            .keywords
            .iter()
            .copied()
            .filter(|kw| text.contains(kw))
            .collect();

        if found.is_empty() {
            return None;
        }

        let mut confidence = keyword_confidence(&found, entry.keywords.len());
        let mut severity = entry.severity;

        if self.is_negated(text, &found) {
            confidence *= NEGATED_CONFIDENCE_FACTOR;
            severity *= NEGATED_SEVERITY_FACTOR;
        }

        Some(CrisisIndicator::new(
            entry.category(),
            severity,
            found.iter().map(|kw| kw.to_string()).collect(),
            keyword_context(text, &found),
            confidence,
            entry.urgency,
        ))
    }

    /// Whether any found keyword is preceded by a negation token
    ///
    /// The regex runs over the whole text so word boundaries are judged in
    /// context; only tokens lying entirely inside the window count.
    pub fn is_negated(&self, text: &str, found: &[&str]) -> bool {
        found.iter().any(|kw| match text.find(kw) {
            Some(pos) if pos > 0 => {
                let window_start = back_chars(text, pos, self.negation_window);
                self.negation
                    .find_iter(&text[..pos])
                    .any(|m| m.start() >= window_start)
            }
            _ => false,
        })
    }
}

/// Match-density confidence for a taxonomy leaf
///
/// `found / total`, ×1.2 for two or more distinct matches, ×1.1 per
/// multi-word phrase matched, capped at 1.0.
pub fn keyword_confidence(found: &[&str], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let mut confidence = (found.len() as f64 / total as f64).min(1.0);

    if found.len() > 1 {
        confidence *= 1.2;
    }

    for kw in found {
        if kw.split_whitespace().count() > 1 {
            confidence *= 1.1;
        }
    }

    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(DEFAULT_NEGATION_WINDOW).unwrap()
    }

    fn find<'a>(indicators: &'a [CrisisIndicator], category: &str) -> Option<&'a CrisisIndicator> {
        indicators.iter().find(|i| i.category == category)
    }

    #[test]
    fn test_confidence_single_word() {
        let c = keyword_confidence(&["hopeless"], 8);
        assert!((c - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_boosts() {
        // 2/10 * 1.2 * 1.1 (one phrase)
        let c = keyword_confidence(&["want to die", "suicide"], 10);
        assert!((c - 0.2 * 1.2 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_capped() {
        let c = keyword_confidence(&["a b", "c d", "e f"], 3);
        assert_eq!(c, 1.0);
    }

    #[test]
    fn test_detects_leaf_once() {
        let indicators = matcher().detect("i feel hopeless, there is no hope left");
        let hopeless = find(&indicators, "high_risk_ideation.hopelessness_severe").unwrap();
        assert_eq!(hopeless.keywords_found, vec!["no hope", "hopeless"]);
        assert_eq!(hopeless.severity, 0.75);
    }

    #[test]
    fn test_negation_dampens() {
        let m = matcher();
        let plain = m.detect("i am suicidal");
        let negated = m.detect("i am not suicidal");

        let p = find(&plain, "high_risk_ideation.suicide_ideation").unwrap();
        let n = find(&negated, "high_risk_ideation.suicide_ideation").unwrap();

        assert!(n.severity < p.severity);
        assert!(n.confidence < p.confidence);
        assert!((n.severity - p.severity * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negation_requires_whole_word() {
        let m = matcher();
        // "know" contains "no" but is not a negation
        assert!(!m.is_negated("i know i am suicidal", &["suicidal"]));
        assert!(m.is_negated("i'm never suicidal", &["suicidal"]));
    }

    #[test]
    fn test_word_cut_at_window_edge_is_not_negation() {
        let m = matcher();
        // the window starts inside "casino", at "no and honestly i'm "
        let casino = "i lost everything at the casino and honestly i'm suicidal";
        let bar = "i lost everything at the bar and honestly i'm suicidal";
        assert!(!m.is_negated(casino, &["suicidal"]));
        assert!(!m.is_negated(bar, &["suicidal"]));

        let c = find(&m.detect(casino), "high_risk_ideation.suicide_ideation")
            .unwrap()
            .clone();
        let b = find(&m.detect(bar), "high_risk_ideation.suicide_ideation")
            .unwrap()
            .clone();
        assert_eq!(c.severity, b.severity);
        assert_eq!(c.confidence, b.confidence);
    }

    #[test]
    fn test_negation_straddling_window_start_ignored() {
        let m = KeywordMatcher::new(5).unwrap();
        // "not" begins one character before the 5-char window
        assert!(!m.is_negated("not i suicidal", &["suicidal"]));
        assert!(m.is_negated("i not suicidal", &["suicidal"]));
    }

    #[test]
    fn test_negation_outside_window_ignored() {
        let m = matcher();
        let text = "not that it matters much but honestly i am suicidal";
        assert!(!m.is_negated(text, &["suicidal"]));
    }

    #[test]
    fn test_no_match_yields_nothing() {
        assert!(matcher().detect("feeling okay today, just a bit tired").is_empty());
    }
}
