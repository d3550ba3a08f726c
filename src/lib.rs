//! crisisguard - Crisis risk assessment for mood-journal text
//!
//! Scores free-form journal text for suicide and self-harm risk, combining
//! a static keyword taxonomy, regex pattern detectors and contextual phrase
//! sets with optional mood context and user history.
//!
//! # Architecture
//!
//! Assessment is a pure function of its inputs:
//! - Detectors produce crisis indicators, merged by category
//! - Indicators are scored, then adjusted by context and history
//! - The score maps to a risk level, which fixes the intervention type
//! - Internal failures degrade to a minimal assessment carrying the error
//!
//! # Modules
//!
//! - `domain`: Data structures (CrisisAssessment, CrisisIndicator, RiskLevel)
//! - `detect`: Taxonomy, keyword, pattern and contextual detectors
//! - `core`: Scoring, the assessor service, crisis management
//! - `adapters`: Sentiment signal and incident recorder seams
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Assess a journal entry
//! echo "entry text" | crisisguard assess --mood-score 3
//!
//! # Show resources for a level
//! crisisguard resources --level high
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod detect;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{IncidentRecorder, SentimentSignal, SignalReading};
pub use crate::core::{AssessmentError, AssessorSettings, CrisisAssessor, CrisisManagementService};
pub use domain::{
    CrisisAssessment, CrisisIndicator, CrisisSummary, InterventionType, MoodContext, RiskLevel,
    Urgency, UserHistory,
};
