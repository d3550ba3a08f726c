//! Crisis management: assessment, incident recording and intervention.
//!
//! Wraps a shared `CrisisAssessor` and an `IncidentRecorder`. A failed
//! assessment never degrades to "no risk" here: the service answers with a
//! precautionary response that points the user at the lifeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::assessor::CrisisAssessor;
use super::guidance::crisis_lifeline;
use crate::adapters::{IncidentRecorder, SentimentSignal};
use crate::domain::{
    AssessmentMetadata, CrisisAssessment, CrisisIncident, InterventionType, MoodContext,
    Resource, RiskLevel, Urgency, UserHistory,
};

const UNKNOWN_LEVEL: &str = "unknown";
const PRECAUTIONARY: &str = "precautionary";
const PRECAUTIONARY_SCORE: f64 = 0.5;

fn serialize_level<S: Serializer>(level: &Option<RiskLevel>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(level.map(|l| l.as_str()).unwrap_or(UNKNOWN_LEVEL))
}

fn serialize_intervention<S: Serializer>(
    kind: &Option<InterventionType>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.map(|k| k.as_str()).unwrap_or(PRECAUTIONARY))
}

/// Per-indicator view in a management response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorView {
    pub category: String,
    pub severity: f64,
    pub confidence: f64,
    pub urgency: Urgency,
}

/// Assessment as reported to API callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    /// `None` when the assessment failed; serialized as `"unknown"`
    #[serde(serialize_with = "serialize_level")]
    pub risk_level: Option<RiskLevel>,
    pub risk_score: f64,
    pub intervention_required: bool,
    pub immediate_actions: Vec<String>,
    pub crisis_indicators: Vec<IndicatorView>,
    pub protective_factors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_metadata: Option<AssessmentMetadata>,
}

impl From<&CrisisAssessment> for AssessmentView {
    fn from(assessment: &CrisisAssessment) -> Self {
        Self {
            risk_level: Some(assessment.risk_level),
            risk_score: assessment.risk_score,
            intervention_required: assessment.intervention_type != InterventionType::None,
            immediate_actions: assessment.immediate_actions.clone(),
            crisis_indicators: assessment
                .crisis_indicators
                .iter()
                .map(|ind| IndicatorView {
                    category: ind.category.clone(),
                    severity: ind.severity,
                    confidence: ind.confidence,
                    urgency: ind.urgency_level,
                })
                .collect(),
            protective_factors: assessment.protective_factors.clone(),
            assessment_metadata: Some(assessment.assessment_metadata.clone()),
        }
    }
}

/// What the service did in response to an assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionResponse {
    /// `None` for the precautionary response
    #[serde(rename = "type", serialize_with = "serialize_intervention")]
    pub kind: Option<InterventionType>,
    pub triggered_at: DateTime<Utc>,
    pub actions_taken: Vec<String>,
    pub notifications_sent: Vec<String>,
}

impl InterventionResponse {
    fn for_type(kind: InterventionType) -> Self {
        let actions: &[&str] = match kind {
            InterventionType::ImmediateIntervention => &[
                "Emergency alert generated",
                "Crisis resources provided",
                "Immediate safety instructions given",
            ],
            InterventionType::EmergencyServices => &[
                "Emergency services recommendation provided",
                "911 and crisis hotline numbers provided",
                "Safety instructions given",
            ],
            InterventionType::CrisisContact => &[
                "Crisis hotline contact information provided",
                "Professional support resources listed",
                "Safety planning encouraged",
            ],
            InterventionType::ProfessionalReferral
            | InterventionType::SelfHelp
            | InterventionType::None => &[],
        };

        Self {
            kind: Some(kind),
            triggered_at: Utc::now(),
            actions_taken: actions.iter().map(|a| a.to_string()).collect(),
            notifications_sent: Vec::new(),
        }
    }

    pub fn is_precautionary(&self) -> bool {
        self.kind.is_none()
    }
}

/// Full response for one handled journal entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagementResponse {
    pub assessment: AssessmentView,
    pub intervention: InterventionResponse,
    pub immediate_action_required: bool,
    pub emergency_services_recommended: bool,
    pub crisis_resources: Vec<Resource>,

    /// Incident id when one was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<Uuid>,

    /// Recording was attempted and failed; the response is still valid
    pub recording_failed: bool,
}

/// Coordinates assessment, incident recording and intervention
pub struct CrisisManagementService {
    assessor: Arc<CrisisAssessor>,
    recorder: Arc<dyn IncidentRecorder>,
    signal: Option<Arc<dyn SentimentSignal>>,
    min_level: RiskLevel,
}

impl CrisisManagementService {
    /// Records incidents at `low` and above
    pub fn new(assessor: Arc<CrisisAssessor>, recorder: Arc<dyn IncidentRecorder>) -> Self {
        Self {
            assessor,
            recorder,
            signal: None,
            min_level: RiskLevel::Low,
        }
    }

    /// Lowest level that is persisted as an incident
    pub fn with_min_level(mut self, min_level: RiskLevel) -> Self {
        self.min_level = min_level;
        self
    }

    /// Consult a sentiment signal during assessment
    pub fn with_signal(mut self, signal: Arc<dyn SentimentSignal>) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn min_level(&self) -> RiskLevel {
        self.min_level
    }

    /// Assess an entry, record it when warranted, and build the response
    #[instrument(skip(self, text, context, history))]
    pub async fn handle(
        &self,
        text: &str,
        user_id: i64,
        mood_entry_id: Option<i64>,
        context: Option<&MoodContext>,
        history: Option<&UserHistory>,
    ) -> ManagementResponse {
        let assessment = match &self.signal {
            Some(signal) => {
                self.assessor
                    .assess_with_signal(text, context, history, signal.as_ref())
                    .await
            }
            None => self.assessor.assess(text, context, history),
        };

        if let Some(err) = &assessment.assessment_metadata.error {
            error!(error = %err, "Assessment failed, sending precautionary response");
            return precautionary_response();
        }

        let mut intervention = InterventionResponse::for_type(assessment.intervention_type);
        let mut incident_id = None;
        let mut recording_failed = false;

        if assessment.risk_level >= self.min_level {
            let incident = CrisisIncident::from_assessment(&assessment, user_id, mood_entry_id, text);
            match self.recorder.record(&incident).await {
                Ok(()) => {
                    info!(incident_id = %incident.id, level = %incident.risk_level, "Crisis incident recorded");
                    intervention
                        .notifications_sent
                        .push(format!("Crisis incident {} recorded", incident.id));
                    incident_id = Some(incident.id);
                }
                Err(e) => {
                    error!(error = %e, "Failed to record crisis incident");
                    recording_failed = true;
                }
            }
        }

        ManagementResponse {
            assessment: AssessmentView::from(&assessment),
            intervention,
            immediate_action_required: assessment.risk_level.requires_immediate_intervention(),
            emergency_services_recommended: assessment.intervention_type
                == InterventionType::EmergencyServices,
            crisis_resources: assessment.resources_recommended.clone(),
            incident_id,
            recording_failed,
        }
    }
}

/// Response used when the assessment itself could not be completed
pub fn precautionary_response() -> ManagementResponse {
    ManagementResponse {
        assessment: AssessmentView {
            risk_level: None,
            risk_score: PRECAUTIONARY_SCORE,
            intervention_required: true,
            immediate_actions: vec![
                "A system error occurred during crisis assessment".to_string(),
                "As a precaution, call 988 if you are having thoughts of self-harm".to_string(),
                "Seek immediate help if you are in crisis".to_string(),
            ],
            crisis_indicators: Vec::new(),
            protective_factors: Vec::new(),
            assessment_metadata: None,
        },
        intervention: InterventionResponse {
            kind: None,
            triggered_at: Utc::now(),
            actions_taken: vec!["Precautionary crisis resources provided".to_string()],
            notifications_sent: Vec::new(),
        },
        immediate_action_required: true,
        emergency_services_recommended: false,
        crisis_resources: vec![crisis_lifeline()],
        incident_id: None,
        recording_failed: false,
    }
}
