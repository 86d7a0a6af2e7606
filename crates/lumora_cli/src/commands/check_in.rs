use std::collections::HashMap;

use chrono::Timelike;
use lumora_core::{
    CRISIS_RESPONSE, CheckIn, CheckInOutcome, EmotionVector, LumoraConfig, MoodIntensity,
    MoodLevel,
};
use miette::{Result, miette};

use super::Companion;
use crate::output::{Output, format_mood, format_verification};

/// Parse `emotion=score` pairs into a vector
///
/// Missing emotions score zero and scores are clamped into [0, 1].
pub fn parse_emotions(pairs: &[String]) -> Result<Option<EmotionVector>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut scores = HashMap::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| miette!("expected emotion=score, got '{}'", pair))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| miette!("'{}' is not a number", value))?;
        scores.insert(name.trim().to_lowercase(), value);
    }

    Ok(Some(EmotionVector::from_scores(&scores)))
}

/// Record a check-in and show the reply
pub async fn run(
    companion: &mut Companion,
    config: &LumoraConfig,
    mood: MoodLevel,
    intensity: MoodIntensity,
    reflection: Option<&str>,
    emotions: &[String],
) -> Result<()> {
    let output = Output::new();

    let mut check_in = CheckIn::new(mood, intensity);
    if let Some(reflection) = reflection {
        check_in = check_in.with_reflection(reflection);
    }
    if let Some(vector) = parse_emotions(emotions)? {
        if !config.user.enable_camera {
            output.status("Emotion scores supplied manually; camera detection is off.");
        }
        check_in = check_in.with_emotions(vector);
    }

    match companion.session.check_in(check_in).await {
        CheckInOutcome::Recorded { entry, response } => {
            output.section("Check-in recorded");
            output.kv("Mood", &format_mood(entry.user_mood()));
            output.kv("Intensity", entry.intensity().label());
            output.kv("Verification", &format_verification(entry.verification()));
            if let Some(vector) = entry.emotion_vector() {
                let (dominant, score) = vector.dominant();
                output.kv("Detected", &format!("{} ({:.2})", dominant, score));
            }

            let hour = chrono::Local::now().hour() as u8;
            if companion.session.crisis_state().is_active {
                output.crisis(&CRISIS_RESPONSE);
            } else if config.user.is_quiet_hour(hour) {
                output.status("Quiet hours. Keeping it short tonight.");
                output.success("Saved. Rest well.");
            } else {
                output.companion_message(&response);
            }
        }
        CheckInOutcome::Crisis {
            trigger,
            entry,
            response,
        } => {
            tracing::debug!("check-in ended in crisis via {} path", trigger);
            if entry.is_none() {
                output.status("Your reflection was not saved.");
            }
            output.crisis(&response);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumora_core::Emotion;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_emotions() {
        assert_eq!(parse_emotions(&[]).unwrap(), None);

        let vector = parse_emotions(&["Sad=0.9".to_string(), "happy = 1.4".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(vector.get(Emotion::Sad), 0.9);
        assert_eq!(vector.get(Emotion::Happy), 1.0);
        assert_eq!(vector.get(Emotion::Neutral), 0.0);
    }

    #[test]
    fn test_parse_emotions_rejects_garbage() {
        assert!(parse_emotions(&["sad".to_string()]).is_err());
        assert!(parse_emotions(&["sad=lots".to_string()]).is_err());
    }
}
