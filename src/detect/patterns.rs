//! Regex detectors for signals plain keyword matching misses.
//!
//! - Temporal urgency (now / soon / someday), anchored to intent language
//! - Method and location specification
//! - Final-action language
//! - Escalation language

use regex::Regex;

use super::text::context_around;
use crate::domain::{CrisisIndicator, Urgency};

/// Words that make a temporal expression crisis-relevant
const INTENT_ANCHOR: &str = r"\b(?:die|dying|dead|kill|suicide|suicidal|end it|end my life|hurt myself|harm myself|overdose|cut myself|jump)\b";

struct TemporalRule {
    name: &'static str,
    pattern: &'static str,
    severity: f64,
    urgency: Urgency,
}

static TEMPORAL_RULES: [TemporalRule; 3] = [
    TemporalRule {
        name: "immediate",
        pattern: r"\b(?:now|today|tonight|right now|this moment|about to)\b",
        severity: 0.9,
        urgency: Urgency::Immediate,
    },
    TemporalRule {
        name: "soon",
        pattern: r"\b(?:tomorrow|this week|soon|planning to|going to)\b",
        severity: 0.7,
        urgency: Urgency::Medium,
    },
    TemporalRule {
        name: "vague",
        pattern: r"\b(?:someday|eventually|thinking about|considering)\b",
        severity: 0.4,
        urgency: Urgency::Low,
    },
];

struct MethodRule {
    name: &'static str,
    pattern: &'static str,
    severity: f64,
}

static METHOD_RULES: [MethodRule; 3] = [
    MethodRule {
        name: "specific_method",
        pattern: r"\b(?:pills?|rope|gun|knife|bridge|cliff|overdose|hanging)\b",
        severity: 0.8,
    },
    MethodRule {
        name: "location_specific",
        pattern: r"\b(?:bridge|roof|track|highway|cliff|tall building)\b",
        severity: 0.7,
    },
    MethodRule {
        name: "final_actions",
        pattern: r"\b(?:goodbye|farewell|last time|final|won't see)\b",
        severity: 0.7,
    },
];

const ESCALATION_PATTERNS: [&str; 3] = [
    r"\b(?:getting worse|spiraling|falling apart|losing control)\b",
    r"\b(?:can't take|can't handle|too much|overwhelming)\b",
    r"\b(?:breaking point|last straw|enough|end of rope)\b",
];

const TEMPORAL_CONFIDENCE: f64 = 0.7;
const METHOD_CONFIDENCE: f64 = 0.8;
const ESCALATION_SEVERITY: f64 = 0.6;
const ESCALATION_CONFIDENCE: f64 = 0.6;

struct Compiled<R> {
    rule: R,
    regex: Regex,
}

/// Compiled pattern detectors; build once and share
pub struct PatternDetectors {
    intent_anchor: Regex,
    temporal: Vec<Compiled<&'static TemporalRule>>,
    methods: Vec<Compiled<&'static MethodRule>>,
    escalation: Vec<Regex>,
}

impl std::fmt::Debug for PatternDetectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDetectors")
            .field("temporal", &self.temporal.len())
            .field("methods", &self.methods.len())
            .field("escalation", &self.escalation.len())
            .finish()
    }
}

impl PatternDetectors {
    pub fn new() -> Result<Self, regex::Error> {
        let temporal = TEMPORAL_RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).map(|regex| Compiled { rule, regex }))
            .collect::<Result<Vec<_>, _>>()?;

        let methods = METHOD_RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).map(|regex| Compiled { rule, regex }))
            .collect::<Result<Vec<_>, _>>()?;

        let escalation = ESCALATION_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            intent_anchor: Regex::new(INTENT_ANCHOR)?,
            temporal,
            methods,
            escalation,
        })
    }

    /// Run every pattern detector over normalised text
    pub fn detect(&self, text: &str) -> Vec<CrisisIndicator> {
        let mut indicators = self.detect_temporal(text);
        indicators.extend(self.detect_methods(text));
        indicators.extend(self.detect_escalation(text));
        indicators
    }

    /// Temporal expressions only count alongside intent language
    fn detect_temporal(&self, text: &str) -> Vec<CrisisIndicator> {
        if !self.intent_anchor.is_match(text) {
            return Vec::new();
        }

        self.temporal
            .iter()
            .filter_map(|c| {
                c.regex.find(text).map(|m| {
                    CrisisIndicator::new(
                        format!("temporal_urgency.{}", c.rule.name),
                        c.rule.severity,
                        vec![format!("temporal_pattern_{}", c.rule.name)],
                        context_around(text, m.start(), m.end()),
                        TEMPORAL_CONFIDENCE,
                        c.rule.urgency,
                    )
                })
            })
            .collect()
    }

    fn detect_methods(&self, text: &str) -> Vec<CrisisIndicator> {
        self.methods
            .iter()
            .filter_map(|c| {
                let matches: Vec<_> = c.regex.find_iter(text).collect();
                let first = matches.first()?;
                Some(CrisisIndicator::new(
                    format!("method_pattern.{}", c.rule.name),
                    c.rule.severity,
                    matches.iter().map(|m| m.as_str().to_string()).collect(),
                    context_around(text, first.start(), first.end()),
                    METHOD_CONFIDENCE,
                    Urgency::High,
                ))
            })
            .collect()
    }

    fn detect_escalation(&self, text: &str) -> Vec<CrisisIndicator> {
        self.escalation
            .iter()
            .enumerate()
            .filter_map(|(i, regex)| {
                regex.find(text).map(|m| {
                    CrisisIndicator::new(
                        format!("escalation_pattern.{}", i),
                        ESCALATION_SEVERITY,
                        vec![format!("escalation_{}", i)],
                        context_around(text, m.start(), m.end()),
                        ESCALATION_CONFIDENCE,
                        Urgency::Medium,
                    )
                })
            })
            .collect()
    }
}
