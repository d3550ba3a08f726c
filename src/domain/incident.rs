//! Crisis incident records handed to the persistence collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::assessment::CrisisAssessment;
use super::level::{InterventionType, RiskLevel};

/// One persisted crisis incident
///
/// The raw text is never stored; `text_sha256` lets an operator match an
/// incident to a journal entry without keeping the entry's content twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisIncident {
    pub id: Uuid,
    pub user_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_entry_id: Option<i64>,

    pub risk_level: RiskLevel,
    pub risk_score: f64,

    /// Indicator categories, in assessment order
    pub risk_indicators: Vec<String>,

    pub intervention_triggered: bool,
    pub intervention_type: InterventionType,
    pub text_sha256: String,
    pub recorded_at: DateTime<Utc>,
}

impl CrisisIncident {
    pub fn from_assessment(
        assessment: &CrisisAssessment,
        user_id: i64,
        mood_entry_id: Option<i64>,
        text: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            mood_entry_id,
            risk_level: assessment.risk_level,
            risk_score: assessment.risk_score,
            risk_indicators: assessment
                .crisis_indicators
                .iter()
                .map(|ind| ind.category.clone())
                .collect(),
            intervention_triggered: assessment.intervention_type != InterventionType::None,
            intervention_type: assessment.intervention_type,
            text_sha256: hash_text(text),
            recorded_at: Utc::now(),
        }
    }
}

/// SHA256 of the text, hex-encoded with prefix
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
