//! Tunable assessment settings.
//!
//! Every field has a serde default so a partial `assessment:` block in the
//! config file is valid.

use serde::{Deserialize, Serialize};

use super::error::AssessmentError;
use crate::detect::DEFAULT_NEGATION_WINDOW;

/// Tunables for the crisis assessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessorSettings {
    /// Characters scanned before a keyword for negation (default: 20)
    #[serde(default = "default_negation_window")]
    pub negation_window_chars: usize,

    /// Score at or above which the assessment is flagged for human review (default: 0.7)
    #[serde(default = "default_human_review_threshold")]
    pub human_review_threshold: f64,

    /// First hour of the late-night window (default: 22)
    #[serde(default = "default_late_night_start")]
    pub late_night_start_hour: u32,

    /// Hour at which the late-night window ends, exclusive (default: 6)
    #[serde(default = "default_late_night_end")]
    pub late_night_end_hour: u32,

    /// Longest input analysed, in bytes (default: 1MB)
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
}

fn default_negation_window() -> usize {
    DEFAULT_NEGATION_WINDOW
}
fn default_human_review_threshold() -> f64 {
    0.7
}
fn default_late_night_start() -> u32 {
    22
}
fn default_late_night_end() -> u32 {
    6
}
fn default_max_text_bytes() -> usize {
    1_048_576
} // 1MB

impl Default for AssessorSettings {
    fn default() -> Self {
        Self {
            negation_window_chars: default_negation_window(),
            human_review_threshold: default_human_review_threshold(),
            late_night_start_hour: default_late_night_start(),
            late_night_end_hour: default_late_night_end(),
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

impl AssessorSettings {
    /// Reject settings that would make scoring meaningless
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if !(0.0..=1.0).contains(&self.human_review_threshold) {
            return Err(AssessmentError::InvalidSettings(format!(
                "human_review_threshold must be within [0, 1], got {}",
                self.human_review_threshold
            )));
        }
        if self.late_night_start_hour > 23 || self.late_night_end_hour > 23 {
            return Err(AssessmentError::InvalidSettings(format!(
                "late-night hours must be 0-23, got {}-{}",
                self.late_night_start_hour, self.late_night_end_hour
            )));
        }
        if self.max_text_bytes == 0 {
            return Err(AssessmentError::InvalidSettings(
                "max_text_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `hour` falls inside the late-night window
    pub fn is_late_night(&self, hour: u32) -> bool {
        if self.late_night_start_hour <= self.late_night_end_hour {
            hour >= self.late_night_start_hour && hour < self.late_night_end_hour
        } else {
            hour >= self.late_night_start_hour || hour < self.late_night_end_hour
        }
    }
}
