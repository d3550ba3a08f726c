//! Static crisis keyword taxonomy and protective-factor lexicon.
//!
//! Each leaf carries a fixed severity, urgency and suggested intervention.
//! Keywords are lower-case; multi-word phrases match as a single unit.

use crate::domain::{InterventionType, Urgency};

/// One leaf of the taxonomy (`group.leaf`)
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyEntry {
    pub group: &'static str,
    pub leaf: &'static str,
    pub keywords: &'static [&'static str],
    pub severity: f64,
    pub urgency: Urgency,
    /// Informational; the applied intervention always follows the risk level
    pub intervention: InterventionType,
}

impl TaxonomyEntry {
    /// Fully-qualified category name
    pub fn category(&self) -> String {
        format!("{}.{}", self.group, self.leaf)
    }
}

pub const SUICIDE_EXPLICIT: &str = "imminent_danger.suicide_explicit";
pub const SELF_HARM_IMMEDIATE: &str = "imminent_danger.self_harm_immediate";

/// Categories that force an imminent classification regardless of score
pub const IMMINENT_CATEGORIES: [&str; 2] = [SUICIDE_EXPLICIT, SELF_HARM_IMMEDIATE];

pub static CRISIS_TAXONOMY: &[TaxonomyEntry] = &[
    // imminent danger
    TaxonomyEntry {
        group: "imminent_danger",
        leaf: "suicide_explicit",
        keywords: &[
            "kill myself",
            "end my life",
            "take my own life",
            "suicide plan",
            "going to kill myself",
            "want to die today",
            "tonight is the night",
            "this is goodbye",
            "final message",
            "last time",
            "won't see me again",
        ],
        severity: 1.0,
        urgency: Urgency::Immediate,
        intervention: InterventionType::ImmediateIntervention,
    },
    TaxonomyEntry {
        group: "imminent_danger",
        leaf: "self_harm_immediate",
        keywords: &[
            "cutting myself now",
            "about to hurt myself",
            "pills in hand",
            "rope ready",
            "bridge nearby",
            "gun loaded",
            "razor blade",
            "overdose tonight",
            "jumping off",
        ],
        severity: 0.95,
        urgency: Urgency::Immediate,
        intervention: InterventionType::EmergencyServices,
    },
    TaxonomyEntry {
        group: "imminent_danger",
        leaf: "method_specific",
        keywords: &[
            "hanging",
            "overdose",
            "pills",
            "bridge",
            "train tracks",
            "gun",
            "knife",
            "razor",
            "poison",
            "carbon monoxide",
            "cliff",
            "tall building",
        ],
        severity: 0.9,
        urgency: Urgency::Immediate,
        intervention: InterventionType::CrisisContact,
    },
    // high-risk ideation
    TaxonomyEntry {
        group: "high_risk_ideation",
        leaf: "suicide_ideation",
        keywords: &[
            "want to die",
            "wish i was dead",
            "better off dead",
            "end it all",
            "can't go on",
            "no point living",
            "world without me",
            "everyone better without me",
            "suicide",
            "suicidal",
            "kill myself",
            "end my life",
        ],
        severity: 0.8,
        urgency: Urgency::High,
        intervention: InterventionType::CrisisContact,
    },
    TaxonomyEntry {
        group: "high_risk_ideation",
        leaf: "hopelessness_severe",
        keywords: &[
            "no hope",
            "hopeless",
            "nothing will change",
            "permanent solution",
            "only way out",
            "escape",
            "relief from pain",
            "end the suffering",
        ],
        severity: 0.75,
        urgency: Urgency::High,
        intervention: InterventionType::CrisisContact,
    },
    TaxonomyEntry {
        group: "high_risk_ideation",
        leaf: "worthlessness_extreme",
        keywords: &[
            "worthless",
            "useless",
            "burden to everyone",
            "waste of space",
            "failure",
            "mistake",
            "shouldn't exist",
            "deserve to die",
        ],
        severity: 0.7,
        urgency: Urgency::High,
        intervention: InterventionType::ProfessionalReferral,
    },
    // medium-risk warnings
    TaxonomyEntry {
        group: "medium_risk_warning",
        leaf: "self_harm_ideation",
        keywords: &[
            "hurt myself",
            "self harm",
            "cut myself",
            "burn myself",
            "punish myself",
            "deserve pain",
            "cutting",
            "burning",
            "hitting myself",
        ],
        severity: 0.6,
        urgency: Urgency::Medium,
        intervention: InterventionType::ProfessionalReferral,
    },
    TaxonomyEntry {
        group: "medium_risk_warning",
        leaf: "isolation_severe",
        keywords: &[
            "nobody cares",
            "all alone",
            "no one understands",
            "completely isolated",
            "abandoned",
            "forgotten",
            "invisible",
            "doesn't matter",
        ],
        severity: 0.55,
        urgency: Urgency::Medium,
        intervention: InterventionType::ProfessionalReferral,
    },
    TaxonomyEntry {
        group: "medium_risk_warning",
        leaf: "mood_deterioration",
        keywords: &[
            "getting worse",
            "spiraling down",
            "falling apart",
            "losing control",
            "breaking down",
            "can't cope",
            "overwhelmed",
            "drowning",
        ],
        severity: 0.5,
        urgency: Urgency::Medium,
        intervention: InterventionType::ProfessionalReferral,
    },
    // behavioural warnings
    TaxonomyEntry {
        group: "behavioral_warnings",
        leaf: "giving_away_possessions",
        keywords: &[
            "giving away",
            "don't need anymore",
            "take my things",
            "saying goodbye",
            "final arrangements",
            "will and testament",
            "last wishes",
            "goodbye letter",
        ],
        severity: 0.8,
        urgency: Urgency::High,
        intervention: InterventionType::CrisisContact,
    },
    TaxonomyEntry {
        group: "behavioral_warnings",
        leaf: "social_withdrawal",
        keywords: &[
            "staying away from everyone",
            "don't want to see anyone",
            "canceling everything",
            "pushing people away",
            "isolating myself",
            "avoiding contact",
        ],
        severity: 0.4,
        urgency: Urgency::Medium,
        intervention: InterventionType::ProfessionalReferral,
    },
    TaxonomyEntry {
        group: "behavioral_warnings",
        leaf: "substance_abuse_escalation",
        keywords: &[
            "drinking more",
            "using more drugs",
            "numbing the pain",
            "escape reality",
            "too many pills",
            "overdose",
            "blackout",
            "lose consciousness",
        ],
        severity: 0.6,
        urgency: Urgency::Medium,
        intervention: InterventionType::ProfessionalReferral,
    },
];

/// Protective-factor lexicon, by factor category
pub static PROTECTIVE_FACTORS: &[(&str, &[&str])] = &[
    (
        "social_support",
        &[
            "family",
            "friends",
            "support",
            "help",
            "care about me",
            "love me",
            "there for me",
            "talk to someone",
            "reach out",
        ],
    ),
    (
        "future_orientation",
        &[
            "tomorrow",
            "next week",
            "future",
            "plans",
            "goals",
            "looking forward",
            "excited about",
            "hoping for",
        ],
    ),
    (
        "coping_strategies",
        &[
            "therapy",
            "counseling",
            "meditation",
            "exercise",
            "breathing",
            "coping",
            "managing",
            "treatment",
        ],
    ),
    (
        "help_seeking",
        &[
            "getting help",
            "seeing therapist",
            "calling hotline",
            "seeking support",
            "asking for help",
            "professional help",
        ],
    ),
    (
        "meaning_purpose",
        &[
            "purpose",
            "meaning",
            "reason to live",
            "responsibility",
            "children",
            "pets",
            "dreams",
            "passion",
        ],
    ),
];

/// Emotion tags that count as risk factors when present in the mood context
pub const HIGH_RISK_EMOTIONS: [&str; 4] = ["hopeless", "worthless", "trapped", "desperate"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_categories_are_unique() {
        let categories: HashSet<String> = CRISIS_TAXONOMY.iter().map(|e| e.category()).collect();
        assert_eq!(categories.len(), CRISIS_TAXONOMY.len());
    }

    #[test]
    fn test_keywords_are_lowercase_and_nonempty() {
        for entry in CRISIS_TAXONOMY {
            assert!(!entry.keywords.is_empty(), "{} has no keywords", entry.category());
            for kw in entry.keywords {
                assert_eq!(*kw, kw.to_lowercase());
            }
            assert!((0.0..=1.0).contains(&entry.severity));
        }
    }

    #[test]
    fn test_suggested_intervention_tracks_urgency() {
        for entry in CRISIS_TAXONOMY {
            if entry.urgency == Urgency::Immediate {
                assert!(
                    entry.intervention >= InterventionType::CrisisContact,
                    "{} suggests {:?}",
                    entry.category(),
                    entry.intervention
                );
            }
        }
    }

    #[test]
    fn test_imminent_categories_exist() {
        for category in IMMINENT_CATEGORIES {
            assert!(CRISIS_TAXONOMY.iter().any(|e| e.category() == category));
        }
    }
}
