//! Mood check-in records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, EmotionVector};
use crate::error::ValidationError;
use crate::id::MoodEntryId;
use crate::sanitize::sanitize_reflection;
use crate::verification::verify;

/// Self-reported mood, ordered from most to least positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLevel {
    Great,
    Good,
    Okay,
    Low,
    Struggling,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::Great,
        MoodLevel::Good,
        MoodLevel::Okay,
        MoodLevel::Low,
        MoodLevel::Struggling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLevel::Great => "great",
            MoodLevel::Good => "good",
            MoodLevel::Okay => "okay",
            MoodLevel::Low => "low",
            MoodLevel::Struggling => "struggling",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            MoodLevel::Great => "Great",
            MoodLevel::Good => "Good",
            MoodLevel::Okay => "Okay",
            MoodLevel::Low => "Low",
            MoodLevel::Struggling => "Struggling",
        }
    }

    /// The emotion a matching emotion vector should be dominated by
    pub fn expected_emotion(&self) -> Emotion {
        match self {
            MoodLevel::Great | MoodLevel::Good => Emotion::Happy,
            MoodLevel::Okay => Emotion::Neutral,
            MoodLevel::Low | MoodLevel::Struggling => Emotion::Sad,
        }
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownMoodLevel {
                value: s.to_string(),
            })
    }
}

/// How strongly the mood is felt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl MoodIntensity {
    pub const ALL: [MoodIntensity; 3] =
        [MoodIntensity::Low, MoodIntensity::Medium, MoodIntensity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodIntensity::Low => "low",
            MoodIntensity::Medium => "medium",
            MoodIntensity::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodIntensity::Low => "A little",
            MoodIntensity::Medium => "Moderate",
            MoodIntensity::High => "Very much",
        }
    }
}

impl fmt::Display for MoodIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodIntensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodIntensity::ALL
            .into_iter()
            .find(|intensity| intensity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownIntensity {
                value: s.to_string(),
            })
    }
}

/// Agreement between the declared mood and the emotion vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodVerification {
    Confirmed,
    Mismatch,
    #[default]
    Uncertain,
}

impl fmt::Display for MoodVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoodVerification::Confirmed => "CONFIRMED",
            MoodVerification::Mismatch => "MISMATCH",
            MoodVerification::Uncertain => "UNCERTAIN",
        })
    }
}

/// One check-in
///
/// Entries are immutable once created. The verification verdict is computed
/// in [`MoodEntry::new`] and stored as-is; reloading never recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    id: MoodEntryId,
    timestamp: DateTime<Utc>,
    user_mood: MoodLevel,
    intensity: MoodIntensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emotion_vector: Option<EmotionVector>,
    #[serde(default)]
    verification: MoodVerification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reflection: Option<String>,
}

impl MoodEntry {
    /// Create an entry, deriving its verification and sanitizing the reflection
    ///
    /// A reflection that is empty after sanitization is dropped.
    pub fn new(
        id: MoodEntryId,
        timestamp: DateTime<Utc>,
        user_mood: MoodLevel,
        intensity: MoodIntensity,
        emotion_vector: Option<EmotionVector>,
        reflection: Option<&str>,
    ) -> Self {
        let verification = verify(user_mood, emotion_vector.as_ref());
        let reflection = reflection
            .map(sanitize_reflection)
            .filter(|text| !text.trim().is_empty());

        Self {
            id,
            timestamp,
            user_mood,
            intensity,
            emotion_vector,
            verification,
            reflection,
        }
    }

    pub fn id(&self) -> MoodEntryId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn user_mood(&self) -> MoodLevel {
        self.user_mood
    }

    pub fn intensity(&self) -> MoodIntensity {
        self.intensity
    }

    pub fn emotion_vector(&self) -> Option<&EmotionVector> {
        self.emotion_vector.as_ref()
    }

    pub fn verification(&self) -> MoodVerification {
        self.verification
    }

    pub fn reflection(&self) -> Option<&str> {
        self.reflection.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;

    fn sample_entry() -> MoodEntry {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 5, 2, 21, 15, 42)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        MoodEntry::new(
            MoodEntryId::generate(),
            timestamp,
            MoodLevel::Low,
            MoodIntensity::High,
            Some(EmotionVector::zero().with(Emotion::Sad, 0.8)),
            Some("Long day <b>at work</b>"),
        )
    }

    #[test]
    fn test_new_entry_derives_verification_and_sanitizes() {
        let entry = sample_entry();
        assert_eq!(entry.verification(), MoodVerification::Confirmed);
        assert_eq!(entry.reflection(), Some("Long day at work"));
    }

    #[test]
    fn test_blank_reflection_is_dropped() {
        let entry = MoodEntry::new(
            MoodEntryId::generate(),
            Utc::now(),
            MoodLevel::Okay,
            MoodIntensity::Low,
            None,
            Some("<br/>  "),
        );
        assert_eq!(entry.reflection(), None);
        assert_eq!(entry.verification(), MoodVerification::Uncertain);
    }

    #[test]
    fn test_entry_survives_storage_round_trip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-05-02T21:15:42.123Z\""));
        assert!(json.contains("\"userMood\":\"low\""));
        assert!(json.contains("\"verification\":\"CONFIRMED\""));

        let back: MoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_mood(), entry.user_mood());
        assert_eq!(back.intensity(), entry.intensity());
        assert_eq!(back.reflection(), entry.reflection());
        assert_eq!(back.timestamp().timestamp(), entry.timestamp().timestamp());
        assert_eq!(back, entry);
    }

    #[test]
    fn test_stored_verification_is_not_recomputed() {
        let json = r#"{
            "id": "mood_6a1f5e43-5a8e-4f6c-9c1e-8d2f7c3b9a10",
            "timestamp": "2024-05-02T21:15:42Z",
            "userMood": "great",
            "intensity": "medium",
            "verification": "MISMATCH"
        }"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.verification(), MoodVerification::Mismatch);
        assert_eq!(entry.emotion_vector(), None);
    }

    #[test]
    fn test_mood_level_parsing() {
        assert_eq!("Struggling".parse::<MoodLevel>().unwrap(), MoodLevel::Struggling);
        assert!("ecstatic".parse::<MoodLevel>().is_err());
        assert_eq!("high".parse::<MoodIntensity>().unwrap(), MoodIntensity::High);
    }
}
