//! Risk levels and the intervention each one requires.
//!
//! Both enums are declared in increasing order of severity, so the derived
//! `Ord` is the clinical ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Six-tier classification of overall danger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
    Imminent,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 6] = [
        RiskLevel::Minimal,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
        RiskLevel::Imminent,
    ];

    /// Threshold classification of a risk score, without category overrides
    pub fn from_score(score: f64) -> Self {
        if score >= 0.95 {
            RiskLevel::Imminent
        } else if score >= 0.80 {
            RiskLevel::Critical
        } else if score >= 0.60 {
            RiskLevel::High
        } else if score >= 0.40 {
            RiskLevel::Medium
        } else if score >= 0.20 {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }

    /// The intervention this level requires
    pub fn intervention(&self) -> InterventionType {
        match self {
            RiskLevel::Imminent => InterventionType::ImmediateIntervention,
            RiskLevel::Critical => InterventionType::EmergencyServices,
            RiskLevel::High => InterventionType::CrisisContact,
            RiskLevel::Medium => InterventionType::ProfessionalReferral,
            RiskLevel::Low => InterventionType::SelfHelp,
            RiskLevel::Minimal => InterventionType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "minimal",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Imminent => "imminent",
        }
    }

    /// Imminent or critical
    pub fn requires_immediate_intervention(&self) -> bool {
        matches!(self, RiskLevel::Imminent | RiskLevel::Critical)
    }

    /// High or medium
    pub fn recommends_professional_help(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Medium)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown risk level: {}", s))
    }
}

/// Category of response action, tied 1:1 to a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    None,
    SelfHelp,
    ProfessionalReferral,
    CrisisContact,
    EmergencyServices,
    ImmediateIntervention,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::None => "none",
            InterventionType::SelfHelp => "self_help",
            InterventionType::ProfessionalReferral => "professional_referral",
            InterventionType::CrisisContact => "crisis_contact",
            InterventionType::EmergencyServices => "emergency_services",
            InterventionType::ImmediateIntervention => "immediate_intervention",
        }
    }

    /// Whether the response should surface emergency contacts
    pub fn needs_emergency_contacts(&self) -> bool {
        matches!(
            self,
            InterventionType::ImmediateIntervention
                | InterventionType::EmergencyServices
                | InterventionType::CrisisContact
        )
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
