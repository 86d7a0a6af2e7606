//! Companion replies
//!
//! Replies are assembled from fixed phrase tables, shaped as
//! validation, offer, optional acknowledgement, then a reminder to reach
//! for people. Selection randomness comes from the caller's RNG.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::mood::MoodLevel;
use crate::ritual::RitualKind;
use crate::space::SpaceKind;

const GREAT_VALIDATION: &[&str] = &[
    "It's wonderful to hear you're feeling great.",
    "That positive energy is something to appreciate.",
    "Glad you're having a good moment.",
];
const GOOD_VALIDATION: &[&str] = &[
    "It's nice that things feel okay right now.",
    "Good moments matter, even small ones.",
    "Thank you for sharing how you're feeling.",
];
const OKAY_VALIDATION: &[&str] = &[
    "Okay is a valid place to be.",
    "Some days are just... days. That's alright.",
    "Thank you for checking in with yourself.",
];
const LOW_VALIDATION: &[&str] = &[
    "It takes courage to acknowledge when things feel hard.",
    "I hear you. Low moments are part of being human.",
    "Thank you for being honest with yourself.",
];
const STRUGGLING_VALIDATION: &[&str] = &[
    "What you're feeling is real and valid.",
    "Reaching out when struggling takes strength.",
    "I'm here to support you through this moment.",
];

const GREAT_OFFERS: &[&str] = &[
    "Would you like to capture this feeling in a quick reflection?",
    "This might be a good time to try something new.",
];
const GOOD_OFFERS: &[&str] = &[
    "Perhaps some calming music would complement this moment?",
    "Would you like a gentle activity to maintain this feeling?",
];
const OKAY_OFFERS: &[&str] = &[
    "Would a short breathing exercise feel helpful?",
    "Sometimes a small change can shift our day.",
];
const LOW_OFFERS: &[&str] = &[
    "Would you like to try a 1-minute grounding exercise?",
    "Sometimes gentle movement or calming sounds can help.",
];
const STRUGGLING_OFFERS: &[&str] = &[
    "Would a breathing exercise feel manageable right now?",
    "I can guide you through a simple grounding technique if you'd like.",
];

pub const HUMAN_REMINDERS: &[&str] = &[
    "Remember, connecting with someone you trust can make a difference.",
    "You're not alone, even when it feels that way.",
    "Taking care of yourself is important work.",
    "Small steps count.",
];

/// Added when the user shared something in their own words
pub const CONTEXT_ACKNOWLEDGEMENT: &str = "What you shared matters.";

pub const PRIVACY_DISCLAIMER: &str = "LUMORA is a supportive companion, not a replacement for professional mental health care.
Your privacy is our priority:
• No video or audio is ever uploaded
• Only your mood choices and written reflections are stored
• Camera analysis happens entirely on your device
• You can delete your data at any time

If you're in crisis, please reach out to a mental health professional or emergency services.";

pub const NOT_A_THERAPIST_DISCLAIMER: &str = "LUMORA is not a therapist or medical professional. For mental health support, please consult a qualified professional.";

/// Fixed lines for the voice companion
#[derive(Debug, Clone, Copy)]
pub struct VoicePrompts {
    pub greeting: &'static str,
    pub listening: &'static str,
    pub acknowledgments: &'static [&'static str],
    pub closing: &'static str,
}

pub const VOICE_PROMPTS: VoicePrompts = VoicePrompts {
    greeting: "Hi. I'm here whenever you're ready to share. Take your time.",
    listening: "I'm listening. There's no rush.",
    acknowledgments: &[
        "Thank you for sharing that with me.",
        "I hear you.",
        "That sounds meaningful.",
    ],
    closing: "Remember, talking to someone you trust can help. Take care.",
};

/// A composed reply plus where to go next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub message: String,
    pub suggested_space: SpaceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ritual: Option<RitualKind>,
}

fn validation_phrases(mood: MoodLevel) -> &'static [&'static str] {
    match mood {
        MoodLevel::Great => GREAT_VALIDATION,
        MoodLevel::Good => GOOD_VALIDATION,
        MoodLevel::Okay => OKAY_VALIDATION,
        MoodLevel::Low => LOW_VALIDATION,
        MoodLevel::Struggling => STRUGGLING_VALIDATION,
    }
}

fn space_offers(mood: MoodLevel) -> &'static [&'static str] {
    match mood {
        MoodLevel::Great => GREAT_OFFERS,
        MoodLevel::Good => GOOD_OFFERS,
        MoodLevel::Okay => OKAY_OFFERS,
        MoodLevel::Low => LOW_OFFERS,
        MoodLevel::Struggling => STRUGGLING_OFFERS,
    }
}

/// Where a mood should be pointed, and which ritual to suggest
pub fn suggestion_for(mood: MoodLevel) -> (SpaceKind, Option<RitualKind>) {
    match mood {
        MoodLevel::Struggling | MoodLevel::Low => (SpaceKind::Voice, Some(RitualKind::Breathing)),
        MoodLevel::Okay => (SpaceKind::Music, Some(RitualKind::Grounding)),
        MoodLevel::Great | MoodLevel::Good => (SpaceKind::Books, None),
    }
}

fn pick<R: Rng + ?Sized>(phrases: &'static [&'static str], rng: &mut R) -> &'static str {
    // Tables are non-empty constants.
    phrases.choose(rng).copied().unwrap_or_default()
}

/// Compose a reply for a check-in
///
/// `context` is whatever the user wrote or said; its content is never echoed
/// back, only acknowledged.
pub fn compose_response<R: Rng + ?Sized>(
    mood: MoodLevel,
    context: Option<&str>,
    rng: &mut R,
) -> CompanionResponse {
    let validation = pick(validation_phrases(mood), rng);
    let offer = pick(space_offers(mood), rng);
    let reminder = pick(HUMAN_REMINDERS, rng);

    let mut message = format!("{validation} {offer}");
    if context.is_some_and(|c| !c.trim().is_empty()) {
        message.push(' ');
        message.push_str(CONTEXT_ACKNOWLEDGEMENT);
    }
    message.push(' ');
    message.push_str(reminder);

    let (suggested_space, ritual) = suggestion_for(mood);
    CompanionResponse {
        message,
        suggested_space,
        ritual,
    }
}

/// Time-of-day greeting for a local hour (0-23)
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        _ => "Welcome back",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_response_is_built_from_tables() {
        let mut rng = StdRng::seed_from_u64(42);
        for mood in MoodLevel::ALL {
            let response = compose_response(mood, None, &mut rng);
            assert!(
                validation_phrases(mood)
                    .iter()
                    .any(|p| response.message.starts_with(p))
            );
            assert!(HUMAN_REMINDERS.iter().any(|r| response.message.ends_with(r)));
            assert!(!response.message.contains(CONTEXT_ACKNOWLEDGEMENT));
        }
    }

    #[test]
    fn test_seeded_rng_gives_identical_responses() {
        let a = compose_response(MoodLevel::Low, Some("rough week"), &mut StdRng::seed_from_u64(9));
        let b = compose_response(MoodLevel::Low, Some("rough week"), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert!(a.message.contains(CONTEXT_ACKNOWLEDGEMENT));
        assert!(!a.message.contains("rough week"));
    }

    #[test]
    fn test_suggestions_follow_mood() {
        let mut rng = StdRng::seed_from_u64(1);
        let struggling = compose_response(MoodLevel::Struggling, None, &mut rng);
        assert_eq!(struggling.suggested_space, SpaceKind::Voice);
        assert_eq!(struggling.ritual, Some(RitualKind::Breathing));

        let okay = compose_response(MoodLevel::Okay, None, &mut rng);
        assert_eq!(okay.suggested_space, SpaceKind::Music);
        assert_eq!(okay.ritual, Some(RitualKind::Grounding));

        let great = compose_response(MoodLevel::Great, None, &mut rng);
        assert_eq!(great.suggested_space, SpaceKind::Books);
        assert_eq!(great.ritual, None);
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good evening");
        assert_eq!(greeting_for_hour(21), "Welcome back");
    }
}
