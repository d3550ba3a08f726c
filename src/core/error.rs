//! Internal assessment errors.
//!
//! These never reach callers of `CrisisAssessor::assess`; they are turned
//! into a minimal-risk assessment with `metadata.error` set.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AssessmentError {
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    #[error("Invalid assessor settings: {0}")]
    InvalidSettings(String),

    #[error("Detector produced an unusable indicator: {category}")]
    Detector { category: String },

    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Failed to compile detection pattern: {0}")]
    Pattern(#[from] regex::Error),
}
