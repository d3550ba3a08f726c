//! Core assessment logic.
//!
//! This module contains:
//! - Settings: Assessor tunables
//! - Scoring: Base score, contextual adjustment, level classification
//! - Factors: Protective and risk factor extraction
//! - Guidance: Immediate actions and resources per level
//! - Assessor: The `CrisisAssessor` service
//! - Management: Incident recording and intervention responses

pub mod assessor;
pub mod error;
pub mod factors;
pub mod guidance;
pub mod management;
pub mod scoring;
pub mod settings;

// Re-export commonly used types
pub use assessor::{CrisisAssessor, EMPTY_INPUT_NOTICE, SIGNAL_CATEGORY};
pub use error::AssessmentError;
pub use guidance::{immediate_actions, recommended_resources};
pub use management::{
    precautionary_response, AssessmentView, CrisisManagementService, InterventionResponse,
    ManagementResponse,
};
pub use scoring::{base_risk_score, classify_risk, RiskScorer};
pub use settings::AssessorSettings;
