//! Domain types for crisis assessment.
//!
//! This module contains the core data structures:
//! - Indicator: A single detected crisis signal
//! - Level: Risk levels and intervention types
//! - Context: Optional mood context and user history inputs
//! - Assessment: The aggregate assessment and its summary
//! - Incident: Records handed to the incident recorder

pub mod assessment;
pub mod context;
pub mod incident;
pub mod indicator;
pub mod level;

// Re-export commonly used types
pub use assessment::{
    AssessmentMetadata, CrisisAssessment, CrisisSummary, Resource, ResourceKind, TopIndicator,
};
pub use context::{MoodContext, UserHistory};
pub use incident::{hash_text, CrisisIncident};
pub use indicator::{CrisisIndicator, Urgency};
pub use level::{InterventionType, RiskLevel};
