//! Crisis assessment output and its summary view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::indicator::{CrisisIndicator, Urgency};
use super::level::{InterventionType, RiskLevel};

/// Channel through which a resource is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Phone,
    Text,
    Emergency,
    InPerson,
    Online,
}

/// A support resource recommended to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub contact: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub availability: String,
    pub description: String,
}

/// Diagnostics attached to every assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    pub processing_time_ms: f64,

    /// Length of the analysed text in characters
    pub text_length: usize,

    pub indicators_found: usize,
    pub protective_factors_count: usize,
    pub risk_factors_count: usize,

    /// `multi_layered_analysis` for a full pass, `minimal_default` otherwise
    pub assessment_method: String,

    pub timestamp: DateTime<Utc>,

    pub requires_human_review: bool,

    /// Input was cut to the configured byte limit before analysis
    #[serde(default)]
    pub truncated: bool,

    /// Set when the input was empty or unusable (not a failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,

    /// Set when the assessment failed internally and fell back to minimal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of one assessment call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub intervention_type: InterventionType,

    /// Sorted by descending severity, one per category
    pub crisis_indicators: Vec<CrisisIndicator>,

    /// `"{category}: {keyword}"` entries; informational only
    pub protective_factors: Vec<String>,

    /// Factors derived from context, history and time of day
    pub risk_factors: Vec<String>,

    pub immediate_actions: Vec<String>,
    pub resources_recommended: Vec<Resource>,
    pub assessment_metadata: AssessmentMetadata,
}

impl CrisisAssessment {
    /// Whether the assessment degraded to the fallback because of an internal error
    pub fn is_error(&self) -> bool {
        self.assessment_metadata.error.is_some()
    }

    /// Compact view for API responses and logs
    pub fn summary(&self) -> CrisisSummary {
        CrisisSummary {
            risk_level: self.risk_level,
            risk_score: self.risk_score,
            intervention_type: self.intervention_type,
            indicators_count: self.crisis_indicators.len(),
            protective_factors_count: self.protective_factors.len(),
            immediate_intervention_required: self.risk_level.requires_immediate_intervention(),
            professional_help_recommended: self.risk_level.recommends_professional_help(),
            top_risk_indicators: self
                .crisis_indicators
                .iter()
                .take(3)
                .map(|ind| TopIndicator {
                    category: ind.category.clone(),
                    severity: ind.severity,
                    urgency: ind.urgency_level,
                })
                .collect(),
            emergency_contacts_needed: self.intervention_type.needs_emergency_contacts(),
        }
    }
}

/// Summary of a crisis assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisSummary {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub intervention_type: InterventionType,
    pub indicators_count: usize,
    pub protective_factors_count: usize,
    pub immediate_intervention_required: bool,
    pub professional_help_recommended: bool,
    pub top_risk_indicators: Vec<TopIndicator>,
    pub emergency_contacts_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopIndicator {
    pub category: String,
    pub severity: f64,
    pub urgency: Urgency,
}
