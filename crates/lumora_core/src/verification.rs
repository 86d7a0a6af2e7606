//! Mood verification
//!
//! Reconciles a declared [`MoodLevel`] with an optional [`EmotionVector`].
//! Ambiguity always resolves to [`MoodVerification::Uncertain`].

use crate::emotion::EmotionVector;
use crate::mood::{MoodLevel, MoodVerification};

/// Expected emotion must dominate and exceed this to confirm
pub const CONFIRM_THRESHOLD: f64 = 0.5;
/// A different dominant emotion must exceed this to flag a mismatch
pub const MISMATCH_THRESHOLD: f64 = 0.7;

/// Compute the verification verdict for a declared mood
///
/// Without a vector there is nothing to compare against, so the result is
/// `Uncertain`. Ties for the dominant emotion follow [`crate::Emotion::ALL`].
pub fn verify(user_mood: MoodLevel, emotion_vector: Option<&EmotionVector>) -> MoodVerification {
    let Some(vector) = emotion_vector else {
        return MoodVerification::Uncertain;
    };

    let expected = user_mood.expected_emotion();
    let (dominant, dominant_value) = vector.dominant();

    let verdict = if dominant == expected && vector.get(expected) > CONFIRM_THRESHOLD {
        MoodVerification::Confirmed
    } else if dominant != expected && dominant_value > MISMATCH_THRESHOLD {
        MoodVerification::Mismatch
    } else {
        MoodVerification::Uncertain
    };

    tracing::debug!(
        "verified {} against dominant {} ({:.2}): {}",
        user_mood,
        dominant,
        dominant_value,
        verdict
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_vector_is_uncertain_for_every_mood() {
        for mood in MoodLevel::ALL {
            assert_eq!(verify(mood, None), MoodVerification::Uncertain);
        }
    }

    #[test]
    fn test_dominant_expected_emotion_confirms() {
        let cases = [
            (MoodLevel::Great, Emotion::Happy),
            (MoodLevel::Good, Emotion::Happy),
            (MoodLevel::Okay, Emotion::Neutral),
            (MoodLevel::Low, Emotion::Sad),
            (MoodLevel::Struggling, Emotion::Sad),
        ];
        for (mood, emotion) in cases {
            let vector = EmotionVector::zero()
                .with(emotion, 0.51)
                .with(Emotion::Surprised, 0.3);
            assert_eq!(
                verify(mood, Some(&vector)),
                MoodVerification::Confirmed,
                "{mood} with dominant {emotion}"
            );
        }
    }

    #[test]
    fn test_confirm_threshold_is_strict() {
        let vector = EmotionVector::zero().with(Emotion::Happy, 0.5);
        assert_eq!(
            verify(MoodLevel::Great, Some(&vector)),
            MoodVerification::Uncertain
        );
    }

    #[test]
    fn test_strong_other_emotion_is_mismatch() {
        let cases = [
            (MoodLevel::Great, Emotion::Happy, Emotion::Sad),
            (MoodLevel::Good, Emotion::Happy, Emotion::Angry),
            (MoodLevel::Okay, Emotion::Neutral, Emotion::Fearful),
            (MoodLevel::Low, Emotion::Sad, Emotion::Happy),
            (MoodLevel::Struggling, Emotion::Sad, Emotion::Disgusted),
        ];
        for (mood, expected, other) in cases {
            assert_eq!(mood.expected_emotion(), expected);
            let vector = EmotionVector::zero()
                .with(expected, 0.4)
                .with(other, 0.75);
            assert_eq!(
                verify(mood, Some(&vector)),
                MoodVerification::Mismatch,
                "{mood} with dominant {other}"
            );
        }
    }

    #[test]
    fn test_mismatch_threshold_is_strict() {
        let vector = EmotionVector::zero().with(Emotion::Fearful, 0.7);
        assert_eq!(
            verify(MoodLevel::Okay, Some(&vector)),
            MoodVerification::Uncertain
        );
    }

    #[test]
    fn test_all_zero_vector_is_uncertain() {
        for mood in MoodLevel::ALL {
            assert_eq!(
                verify(mood, Some(&EmotionVector::zero())),
                MoodVerification::Uncertain
            );
        }
    }

    #[test]
    fn test_tie_goes_to_priority_order() {
        // Happy and sad tie at 0.8; happy comes first, so a "low" check-in
        // sees happy as dominant and reports a mismatch.
        let vector = EmotionVector::zero()
            .with(Emotion::Sad, 0.8)
            .with(Emotion::Happy, 0.8);
        assert_eq!(
            verify(MoodLevel::Low, Some(&vector)),
            MoodVerification::Mismatch
        );
        assert_eq!(
            verify(MoodLevel::Great, Some(&vector)),
            MoodVerification::Confirmed
        );
    }

    #[test]
    fn test_verify_is_deterministic() {
        let vector = EmotionVector::zero()
            .with(Emotion::Neutral, 0.65)
            .with(Emotion::Disgusted, 0.2);
        let first = verify(MoodLevel::Okay, Some(&vector));
        assert_eq!(first, verify(MoodLevel::Okay, Some(&vector)));
    }
}
