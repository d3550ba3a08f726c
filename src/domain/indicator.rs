//! Crisis indicators: single detected signals with severity and confidence.

use serde::{Deserialize, Serialize};

/// Temporal immediacy of an indicator, independent of its severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Immediate,
}

impl Urgency {
    /// Multiplier applied to the indicator-count bonus
    pub fn multiplier(&self) -> f64 {
        match self {
            Urgency::Immediate => 1.5,
            Urgency::High => 1.3,
            Urgency::Medium => 1.1,
            Urgency::Low => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One detected crisis-relevant signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisIndicator {
    /// Taxonomy leaf or detector name (e.g. `imminent_danger.suicide_explicit`)
    pub category: String,

    /// Severity in [0, 1]; halved when the match is negated
    pub severity: f64,

    /// Matched keywords or phrases, in detection order
    pub keywords_found: Vec<String>,

    /// Short snippet around the match, for audit
    pub context: String,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Temporal immediacy
    pub urgency_level: Urgency,
}

impl CrisisIndicator {
    pub fn new(
        category: impl Into<String>,
        severity: f64,
        keywords_found: Vec<String>,
        context: impl Into<String>,
        confidence: f64,
        urgency_level: Urgency,
    ) -> Self {
        Self {
            category: category.into(),
            severity,
            keywords_found,
            context: context.into(),
            confidence,
            urgency_level,
        }
    }

    /// Severity weighted by confidence
    pub fn weighted_severity(&self) -> f64 {
        self.severity * self.confidence
    }

    /// Fold a duplicate of the same category into this one
    pub fn merge(&mut self, other: CrisisIndicator) {
        self.severity = self.severity.max(other.severity);
        self.confidence = self.confidence.max(other.confidence);
        self.urgency_level = self.urgency_level.max(other.urgency_level);
        self.keywords_found.extend(other.keywords_found);
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.severity.is_finite() && self.confidence.is_finite()
    }
}
