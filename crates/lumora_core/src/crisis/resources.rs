//! Fixed crisis content
//!
//! This text is hand-written and never generated.

use serde::Serialize;

/// A place to reach a human
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyResource {
    pub region: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<&'static str>,
}

pub const EMERGENCY_RESOURCES: &[EmergencyResource] = &[
    EmergencyResource {
        region: "US",
        name: "National Suicide Prevention Lifeline",
        phone: Some("988"),
        text: Some("Text HOME to 741741"),
        website: None,
    },
    EmergencyResource {
        region: "UK",
        name: "Samaritans",
        phone: Some("116 123"),
        text: None,
        website: Some("samaritans.org"),
    },
    EmergencyResource {
        region: "GLOBAL",
        name: "International Association for Suicide Prevention",
        phone: None,
        text: None,
        website: Some("https://www.iasp.info/resources/Crisis_Centres/"),
    },
];

/// What the companion says once the crisis flag is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisResponse {
    pub message: &'static str,
    /// Every generated reply is suppressed while this response is showing
    pub stop_all_ai: bool,
}

pub const CRISIS_RESPONSE: CrisisResponse = CrisisResponse {
    message: "I notice you may be going through something really difficult. Your safety matters most right now.

Please reach out to someone who can help:
• In the US: Call or text 988 (Suicide & Crisis Lifeline)
• Crisis Text Line: Text HOME to 741741
• International: findahelpline.com

LUMORA is here to support you, but it's not a substitute for professional help. You deserve real human support right now.",
    stop_all_ai: true,
};

impl EmergencyResource {
    pub fn for_region(region: &str) -> Option<&'static EmergencyResource> {
        EMERGENCY_RESOURCES
            .iter()
            .find(|r| r.region.eq_ignore_ascii_case(region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        let us = EmergencyResource::for_region("us").unwrap();
        assert_eq!(us.phone, Some("988"));
        assert!(EmergencyResource::for_region("mars").is_none());
    }

    #[test]
    fn test_crisis_response_points_to_humans() {
        assert!(CRISIS_RESPONSE.stop_all_ai);
        assert!(CRISIS_RESPONSE.message.contains("988"));
        assert!(CRISIS_RESPONSE.message.contains("741741"));
    }
}
