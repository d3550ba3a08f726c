//! Protective and risk factor extraction.
//!
//! Both lists are descriptive: protective factors do not lower the score,
//! and risk factors are reported separately from crisis indicators.

use super::settings::AssessorSettings;
use crate::detect::taxonomy::HIGH_RISK_EMOTIONS;
use crate::detect::PROTECTIVE_FACTORS;
use crate::domain::{MoodContext, UserHistory};

/// `"{category}: {keyword}"` for every protective keyword present
pub fn protective_factors(text: &str) -> Vec<String> {
    PROTECTIVE_FACTORS
        .iter()
        .flat_map(move |(category, keywords)| {
            keywords
                .iter()
                .filter(move |kw| text.contains(**kw))
                .map(move |kw| format!("{}: {}", category, kw))
        })
        .collect()
}

/// Risk factors from mood context, history and the local hour
pub fn risk_factors(
    context: Option<&MoodContext>,
    history: Option<&UserHistory>,
    local_hour: u32,
    settings: &AssessorSettings,
) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(ctx) = context {
        match ctx.mood_score {
            Some(mood) if mood <= 2.0 => factors.push("Very low mood score".to_string()),
            Some(mood) if mood <= 4.0 => factors.push("Low mood score".to_string()),
            _ => {}
        }

        let risky: Vec<&str> = ctx
            .emotions
            .iter()
            .map(|e| e.trim())
            .filter(|e| HIGH_RISK_EMOTIONS.iter().any(|h| h.eq_ignore_ascii_case(e)))
            .collect();
        if !risky.is_empty() {
            factors.push(format!("High-risk emotions: {}", risky.join(", ")));
        }
    }

    if let Some(history) = history {
        if history.previous_attempts > 0 {
            factors.push("Previous suicide attempts".to_string());
        }
        if history.previous_crisis_incidents > 0 {
            factors.push("Previous crisis incidents".to_string());
        }
        if history.recent_major_loss {
            factors.push("Recent major loss or trauma".to_string());
        }
        if history.substance_abuse_history {
            factors.push("History of substance abuse".to_string());
        }
    }

    if settings.is_late_night(local_hour) {
        factors.push("Late night/early morning timing".to_string());
    }

    factors
}
