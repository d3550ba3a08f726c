//! Immediate actions and support resources, keyed by risk level.

use crate::domain::{Resource, ResourceKind, RiskLevel};

/// Ordered instructions for a risk level, escalating in specificity
pub fn immediate_actions(level: RiskLevel) -> Vec<String> {
    let actions: &[&str] = match level {
        RiskLevel::Imminent => &[
            "IMMEDIATE ACTION REQUIRED",
            "Call 911 now or contact local emergency services",
            "Go to the nearest emergency room immediately",
            "Call 988 (Suicide & Crisis Lifeline), available 24/7",
            "Contact a trusted person to stay with you",
            "Remove or secure any means of self-harm",
        ],
        RiskLevel::Critical => &[
            "URGENT CRISIS SUPPORT NEEDED",
            "Call 988 (Suicide & Crisis Lifeline) immediately",
            "Text HOME to 741741 for the Crisis Text Line",
            "Contact your emergency contact or a trusted person",
            "Consider going to the emergency room",
            "Secure your environment from harmful items",
        ],
        RiskLevel::High => &[
            "Call 988 (Suicide & Crisis Lifeline)",
            "Text HOME to 741741 for immediate support",
            "Reach out to a trusted friend, family member, or counselor",
            "Review your safety plan if you have one",
            "Consider emergency services if feelings intensify",
        ],
        RiskLevel::Medium => &[
            "Contact a mental health professional or counselor",
            "Call a non-emergency crisis support line",
            "Reach out to a trusted support person",
            "Use coping strategies you have learned",
            "Create or review a safety plan",
        ],
        RiskLevel::Low => &[
            "Practice self-care and stress management",
            "Stay connected with your support network",
            "Monitor mood changes",
            "Consider professional support if needed",
        ],
        RiskLevel::Minimal => &[
            "Continue monitoring mood and wellbeing",
            "Stay connected with your support network",
        ],
    };

    actions.iter().map(|a| a.to_string()).collect()
}

fn resource(
    name: &str,
    contact: &str,
    kind: ResourceKind,
    description: &str,
) -> Resource {
    Resource {
        name: name.to_string(),
        contact: contact.to_string(),
        kind,
        availability: "24/7".to_string(),
        description: description.to_string(),
    }
}

/// The lifeline entry, included at every level
pub fn crisis_lifeline() -> Resource {
    resource(
        "988 Suicide & Crisis Lifeline",
        "988",
        ResourceKind::Phone,
        "Free confidential crisis support",
    )
}

/// Resources for a risk level; the lifeline and text line are always first
pub fn recommended_resources(level: RiskLevel) -> Vec<Resource> {
    let mut resources = vec![
        crisis_lifeline(),
        resource(
            "Crisis Text Line",
            "Text HOME to 741741",
            ResourceKind::Text,
            "Crisis counseling via text",
        ),
    ];

    match level {
        RiskLevel::Imminent | RiskLevel::Critical => {
            resources.push(resource(
                "Emergency Services",
                "911",
                ResourceKind::Emergency,
                "Immediate emergency response",
            ));
            resources.push(resource(
                "Emergency Room",
                "Nearest hospital",
                ResourceKind::InPerson,
                "Immediate medical and psychiatric care",
            ));
        }
        RiskLevel::High | RiskLevel::Medium => {
            resources.push(resource(
                "SAMHSA National Helpline",
                "1-800-662-4357",
                ResourceKind::Phone,
                "Mental health treatment referrals",
            ));
            resources.push(resource(
                "Crisis Chat",
                "https://988lifeline.org/chat/",
                ResourceKind::Online,
                "Online crisis chat support",
            ));
        }
        RiskLevel::Low | RiskLevel::Minimal => {}
    }

    resources
}
