//! Crisis signal detection.
//!
//! This module contains:
//! - Taxonomy: Static keyword table and protective-factor lexicon
//! - Keywords: Taxonomy matcher with confidence and negation handling
//! - Patterns: Regex detectors (temporal, method, escalation)
//! - Contextual: Phrase-set detectors (final arrangements, closure, pain)
//!
//! Detectors run independently over the same normalised text; their
//! outputs are merged by category and ranked by severity.

pub mod contextual;
pub mod keywords;
pub mod patterns;
pub mod taxonomy;
pub mod text;

use std::collections::HashMap;

use crate::domain::CrisisIndicator;

pub use contextual::detect_contextual;
pub use keywords::{keyword_confidence, KeywordMatcher, DEFAULT_NEGATION_WINDOW};
pub use patterns::PatternDetectors;
pub use taxonomy::{TaxonomyEntry, CRISIS_TAXONOMY, IMMINENT_CATEGORIES, PROTECTIVE_FACTORS};
pub use text::normalize;

/// All detection layers, compiled once
#[derive(Debug)]
pub struct Detectors {
    keywords: KeywordMatcher,
    patterns: PatternDetectors,
}

impl Detectors {
    pub fn new(negation_window: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            keywords: KeywordMatcher::new(negation_window)?,
            patterns: PatternDetectors::new()?,
        })
    }

    /// Run keyword, pattern and contextual detection; deduplicated and ranked
    pub fn detect(&self, text: &str) -> Vec<CrisisIndicator> {
        let mut indicators = self.keywords.detect(text);
        indicators.extend(self.patterns.detect(text));
        indicators.extend(detect_contextual(text));
        rank(deduplicate(indicators))
    }
}

/// Collapse indicators sharing a category, preserving first-seen order
pub fn deduplicate(indicators: Vec<CrisisIndicator>) -> Vec<CrisisIndicator> {
    let mut unique: Vec<CrisisIndicator> = Vec::with_capacity(indicators.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for indicator in indicators {
        match index.get(&indicator.category) {
            Some(&i) => unique[i].merge(indicator),
            None => {
                index.insert(indicator.category.clone(), unique.len());
                unique.push(indicator);
            }
        }
    }

    unique
}

/// Sort by descending severity; ties keep detection order
pub fn rank(mut indicators: Vec<CrisisIndicator>) -> Vec<CrisisIndicator> {
    indicators.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    indicators
}
