//! Emotion vectors
//!
//! An [`EmotionVector`] holds a normalized intensity in `[0.0, 1.0]` for each of
//! the seven [`Emotion`]s. Vectors only ever hold derived scores, never raw
//! detector frames.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ValidationError;

/// The seven tracked emotions
///
/// Declaration order is the tie-break priority used when two emotions share
/// the maximum intensity: the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Surprised,
    Disgusted,
    Neutral,
}

impl Emotion {
    /// All emotions in tie-break priority order
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Surprised,
        Emotion::Disgusted,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Surprised => "surprised",
            Emotion::Disgusted => "disgusted",
            Emotion::Neutral => "neutral",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownEmotion { key: s.to_string() })
    }
}

/// Normalized per-emotion intensities
///
/// Every value is in `[0.0, 1.0]`; the constructors either clamp or reject,
/// so a vector that exists is always complete and in range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct EmotionVector {
    scores: [f64; 7],
}

fn normalize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl EmotionVector {
    /// A vector with every intensity at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a vector from raw detector scores
    ///
    /// Missing emotions count as zero, values are clamped into `[0.0, 1.0]`,
    /// and unknown keys or non-finite values are dropped.
    pub fn from_scores<K: AsRef<str>>(scores: &HashMap<K, f64>) -> Self {
        let mut vector = Self::zero();
        for (key, value) in scores {
            if let Ok(emotion) = key.as_ref().parse::<Emotion>() {
                vector.scores[emotion.index()] = normalize(*value);
            }
        }
        vector
    }

    /// Strictly validate a complete set of scores
    ///
    /// All seven emotions must be present, with no unknown keys and every
    /// value a finite number in `[0.0, 1.0]`.
    pub fn try_from_pairs<K, I>(pairs: I) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut seen = [false; 7];
        let mut scores = [0.0; 7];
        for (key, value) in pairs {
            let emotion: Emotion = key.as_ref().parse()?;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::OutOfRange { emotion, value });
            }
            scores[emotion.index()] = value;
            seen[emotion.index()] = true;
        }

        if let Some(emotion) = Emotion::ALL.into_iter().find(|e| !seen[e.index()]) {
            return Err(ValidationError::MissingEmotion { emotion });
        }

        Ok(Self { scores })
    }

    /// Return a copy with one emotion set, clamped into `[0.0, 1.0]`
    pub fn with(mut self, emotion: Emotion, value: f64) -> Self {
        self.scores[emotion.index()] = normalize(value);
        self
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.scores[emotion.index()]
    }

    pub fn sad(&self) -> f64 {
        self.get(Emotion::Sad)
    }

    /// Iterate over `(emotion, intensity)` in tie-break priority order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// The emotion with the highest intensity
    ///
    /// Exact ties go to the emotion that comes first in [`Emotion::ALL`], so an
    /// all-zero vector reports `(Happy, 0.0)`.
    pub fn dominant(&self) -> (Emotion, f64) {
        self.iter()
            .fold((Emotion::Happy, self.get(Emotion::Happy)), |best, next| {
                if next.1 > best.1 { next } else { best }
            })
    }
}

impl TryFrom<BTreeMap<String, f64>> for EmotionVector {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::try_from_pairs(map)
    }
}

impl Serialize for EmotionVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Emotion::ALL.len()))?;
        for (emotion, value) in self.iter() {
            map.serialize_entry(emotion.as_str(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dominant_prefers_earlier_emotion_on_tie() {
        let vector = EmotionVector::zero()
            .with(Emotion::Angry, 0.6)
            .with(Emotion::Sad, 0.6)
            .with(Emotion::Neutral, 0.6);
        assert_eq!(vector.dominant(), (Emotion::Sad, 0.6));
    }

    #[test]
    fn test_all_zero_dominant_is_first_key() {
        assert_eq!(EmotionVector::zero().dominant(), (Emotion::Happy, 0.0));
    }

    #[test]
    fn test_from_scores_clamps_and_fills() {
        let scores = HashMap::from([
            ("sad", 1.4),
            ("happy", -0.2),
            ("fearful", f64::NAN),
            ("bored", 0.9),
        ]);
        let vector = EmotionVector::from_scores(&scores);
        assert_eq!(vector.sad(), 1.0);
        assert_eq!(vector.get(Emotion::Happy), 0.0);
        assert_eq!(vector.get(Emotion::Fearful), 0.0);
        assert_eq!(vector.get(Emotion::Neutral), 0.0);
    }

    #[test]
    fn test_strict_validation_rejects_incomplete_vectors() {
        let err = EmotionVector::try_from_pairs([("happy", 0.2), ("sad", 0.1)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingEmotion {
                emotion: Emotion::Angry
            }
        );
    }

    #[test]
    fn test_strict_validation_rejects_out_of_range() {
        let pairs = Emotion::ALL.map(|e| (e.as_str(), if e == Emotion::Sad { 1.2 } else { 0.0 }));
        let err = EmotionVector::try_from_pairs(pairs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                emotion: Emotion::Sad,
                value: 1.2
            }
        );
    }

    #[test]
    fn test_deserialize_requires_every_key() {
        let complete = r#"{"happy":0.1,"sad":0.9,"angry":0,"fearful":0,"surprised":0,"disgusted":0,"neutral":0.2}"#;
        let vector: EmotionVector = serde_json::from_str(complete).unwrap();
        assert_eq!(vector.sad(), 0.9);

        let partial = r#"{"happy":0.1,"sad":0.9}"#;
        assert!(serde_json::from_str::<EmotionVector>(partial).is_err());

        let unknown = r#"{"happy":0.1,"sad":0.9,"angry":0,"fearful":0,"surprised":0,"disgusted":0,"neutral":0.2,"bored":0.5}"#;
        assert!(serde_json::from_str::<EmotionVector>(unknown).is_err());
    }

    #[test]
    fn test_serializes_as_named_map() {
        let vector = EmotionVector::zero().with(Emotion::Happy, 0.75);
        let json = serde_json::to_value(vector).unwrap();
        assert_eq!(json["happy"], 0.75);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }
}
