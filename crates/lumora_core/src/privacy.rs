//! Privacy guard
//!
//! [`SafeMoodData`] is the only shape a check-in takes when it leaves the
//! engine: a mood label, an intensity, normalized emotion scores, the user's
//! own words and a timestamp. Nothing biometric or identifying.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emotion::EmotionVector;
use crate::error::ValidationError;
use crate::mood::{MoodEntry, MoodIntensity, MoodLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeMoodData {
    pub mood_label: MoodLevel,
    pub intensity: MoodIntensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_vector: Option<EmotionVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_text: Option<String>,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl From<&MoodEntry> for SafeMoodData {
    fn from(entry: &MoodEntry) -> Self {
        Self {
            mood_label: entry.user_mood(),
            intensity: entry.intensity(),
            emotion_vector: entry.emotion_vector().copied(),
            reflection_text: entry.reflection().map(str::to_string),
            timestamp: entry.timestamp().to_rfc3339(),
        }
    }
}

fn required_str<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

/// Check untrusted JSON field by field before accepting it as mood data
///
/// Emotion vectors must be complete and in range; reflections, when present,
/// must be strings.
pub fn validate_safe_mood_data(data: &Value) -> Result<SafeMoodData, ValidationError> {
    let Value::Object(object) = data else {
        return Err(ValidationError::WrongType {
            field: "data",
            expected: "an object",
        });
    };

    let mood_label: MoodLevel = required_str(object, "moodLabel")?.parse()?;
    let intensity: MoodIntensity = required_str(object, "intensity")?.parse()?;

    let timestamp = required_str(object, "timestamp")?;
    DateTime::parse_from_rfc3339(timestamp).map_err(|_| ValidationError::InvalidTimestamp {
        value: timestamp.to_string(),
    })?;

    let emotion_vector = match object.get("emotionVector") {
        None | Some(Value::Null) => None,
        Some(Value::Object(scores)) => {
            let mut pairs = Vec::with_capacity(scores.len());
            for (key, value) in scores {
                let Some(number) = value.as_f64() else {
                    return Err(ValidationError::WrongType {
                        field: "emotionVector",
                        expected: "numeric scores between 0 and 1",
                    });
                };
                pairs.push((key.as_str(), number));
            }
            Some(EmotionVector::try_from_pairs(pairs)?)
        }
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "emotionVector",
                expected: "an object of emotion scores",
            });
        }
    };

    let reflection_text = match object.get("reflectionText") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "reflectionText",
                expected: "a string",
            });
        }
    };

    Ok(SafeMoodData {
        mood_label,
        intensity,
        emotion_vector,
        reflection_text,
        timestamp: timestamp.to_string(),
    })
}

impl SafeMoodData {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
