//! Lexicon-based sentiment signal.
//!
//! Scores weighted crisis lexicons by substring presence. It runs in
//! process and never fails, so it doubles as the default signal for the
//! CLI and as a deterministic stand-in for model-backed signals in tests.

use anyhow::Result;
use async_trait::async_trait;

use super::{SentimentSignal, SignalReading};
use crate::domain::RiskLevel;

struct Lexicon {
    label: &'static str,
    weight: f64,
    phrases: &'static [&'static str],
}

static LEXICONS: &[Lexicon] = &[
    Lexicon {
        label: "High risk language",
        weight: 0.3,
        phrases: &[
            "suicide",
            "kill myself",
            "end my life",
            "want to die",
            "better off dead",
            "take my own life",
            "not worth living",
            "end it all",
        ],
    },
    Lexicon {
        label: "Self-harm indicator",
        weight: 0.25,
        phrases: &[
            "hurt myself",
            "cut myself",
            "self harm",
            "self-harm",
            "harm myself",
            "cut my wrists",
            "burning myself",
            "punish myself",
        ],
    },
    Lexicon {
        label: "Hopelessness indicator",
        weight: 0.15,
        phrases: &[
            "no hope",
            "hopeless",
            "nothing matters",
            "pointless",
            "give up",
            "no point",
            "meaningless",
            "worthless",
            "useless",
        ],
    },
    Lexicon {
        label: "Warning sign",
        weight: 0.1,
        phrases: &[
            "can't go on",
            "too much pain",
            "escape",
            "disappear",
            "fade away",
            "nobody cares",
            "all alone",
            "burden",
            "waste of space",
        ],
    },
];

/// Weighted-lexicon sentiment signal
#[derive(Debug, Clone, Default)]
pub struct KeywordSentimentSignal;

impl KeywordSentimentSignal {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous scoring used by `analyse`
    pub fn score(&self, text: &str) -> SignalReading {
        let lowered = text.to_lowercase();
        let mut raw = 0.0;
        let mut indicators = Vec::new();

        for lexicon in LEXICONS {
            for phrase in lexicon.phrases {
                if lowered.contains(phrase) {
                    indicators.push(format!("{}: '{}'", lexicon.label, phrase));
                    raw += lexicon.weight;
                }
            }
        }

        SignalReading {
            risk_score: raw.min(1.0),
            risk_level: level_for(raw),
            indicators,
        }
    }
}

// Thresholds apply to the uncapped sum
fn level_for(raw: f64) -> RiskLevel {
    if raw >= 0.7 {
        RiskLevel::Critical
    } else if raw >= 0.4 {
        RiskLevel::High
    } else if raw >= 0.2 {
        RiskLevel::Medium
    } else if raw > 0.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

#[async_trait]
impl SentimentSignal for KeywordSentimentSignal {
    fn name(&self) -> &str {
        "keyword_sentiment"
    }

    async fn analyse(&self, text: &str) -> Result<Option<SignalReading>> {
        let reading = self.score(text);
        if reading.indicators.is_empty() {
            return Ok(None);
        }
        Ok(Some(reading))
    }
}
