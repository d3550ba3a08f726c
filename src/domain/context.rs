//! Optional caller-supplied signals that accompany the text.
//!
//! Every field is individually optional; an absent field contributes
//! nothing to the score.

use serde::{Deserialize, Serialize};

/// Mood-tracking context for the current entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodContext {
    /// Self-reported mood on the journal's 1-10 scale
    #[serde(default)]
    pub mood_score: Option<f64>,

    /// Emotion tags attached to the entry
    #[serde(default)]
    pub emotions: Vec<String>,

    /// Whether mood has been trending down recently
    #[serde(default)]
    pub recent_mood_decline: bool,
}

impl MoodContext {
    pub fn with_mood_score(mood_score: f64) -> Self {
        Self {
            mood_score: Some(mood_score),
            ..Default::default()
        }
    }
}

/// The user's crisis history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserHistory {
    #[serde(default)]
    pub previous_attempts: u32,

    #[serde(default)]
    pub previous_crisis_incidents: u32,

    #[serde(default)]
    pub crisis_incidents_last_month: u32,

    #[serde(default)]
    pub recent_major_loss: bool,

    #[serde(default)]
    pub substance_abuse_history: bool,
}
