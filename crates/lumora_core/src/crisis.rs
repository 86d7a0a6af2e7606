//! Crisis detection
//!
//! Three independent paths can raise the crisis flag:
//!
//! - **keyword**: a risk phrase appears in free text
//! - **pattern**: repeated very-sad samples inside a sliding one-hour window
//! - **emotion**: a single very-sad sample
//!
//! Detection is deliberately blunt and biased toward triggering. Once raised,
//! the flag stays up until the user dismisses it; no detection path ever
//! lowers it.

pub mod resources;

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::mood::MoodEntry;

pub use resources::{CRISIS_RESPONSE, CrisisResponse, EMERGENCY_RESOURCES, EmergencyResource};

/// Risk phrases matched as lower-case substrings
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "self-harm",
    "hurt myself",
    "no point living",
];

/// Sadness above this is treated as extreme
pub const SAD_THRESHOLD: f64 = 0.85;
/// Length of the pattern window, in milliseconds
pub const PATTERN_WINDOW_MS: i64 = 3_600_000;
/// Extreme samples needed inside the window to trigger
pub const PATTERN_MIN_SAMPLES: usize = 3;

/// Why the crisis flag was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisTrigger {
    Keyword,
    Pattern,
    Emotion,
}

impl std::fmt::Display for CrisisTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CrisisTrigger::Keyword => "keyword",
            CrisisTrigger::Pattern => "pattern",
            CrisisTrigger::Emotion => "emotion",
        })
    }
}

/// Session-scoped crisis flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisState {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<CrisisTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CrisisState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn activated(trigger: CrisisTrigger, at: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            trigger: Some(trigger),
            timestamp: Some(at),
        }
    }
}

/// A single sadness reading with its time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectSample {
    pub sad: f64,
    pub timestamp: DateTime<Utc>,
}

/// Whether free text contains any crisis phrase
pub fn contains_crisis_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Whether a single sadness score is extreme
pub fn exceeds_sad_threshold(sad_score: f64) -> bool {
    sad_score > SAD_THRESHOLD
}

/// Whether enough extreme samples fall inside the window ending at `now`
///
/// The cutoff is `now - PATTERN_WINDOW_MS`, recomputed on every call; samples
/// exactly at the cutoff are outside the window.
pub fn detect_crisis_pattern<I>(samples: I, now: DateTime<Utc>) -> bool
where
    I: IntoIterator<Item = AffectSample>,
{
    let cutoff = now - TimeDelta::milliseconds(PATTERN_WINDOW_MS);
    let extreme = samples
        .into_iter()
        .filter(|s| exceeds_sad_threshold(s.sad) && s.timestamp > cutoff)
        .count();
    extreme >= PATTERN_MIN_SAMPLES
}

/// Sadness samples for the entries that carry an emotion vector
pub fn affect_samples(entries: &[MoodEntry]) -> impl Iterator<Item = AffectSample> + '_ {
    entries.iter().filter_map(|entry| {
        let vector = entry.emotion_vector()?;
        (vector.sad() > 0.0).then(|| AffectSample {
            sad: vector.sad(),
            timestamp: entry.timestamp(),
        })
    })
}

/// Holds the crisis flag and runs the detection paths against it
#[derive(Debug, Clone)]
pub struct CrisisMonitor {
    state: CrisisState,
    clock: Arc<dyn Clock>,
}

impl CrisisMonitor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: CrisisState::inactive(),
            clock,
        }
    }

    pub fn state(&self) -> &CrisisState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Keyword path: scan raw text for risk phrases
    pub fn check_text(&mut self, text: &str) -> bool {
        self.trigger_if(contains_crisis_keywords(text), CrisisTrigger::Keyword)
    }

    /// Pattern path: look for sustained extreme sadness in recent entries
    pub fn check_mood_pattern(&mut self, entries: &[MoodEntry]) -> bool {
        let now = self.clock.now();
        let hit = detect_crisis_pattern(affect_samples(entries), now);
        self.trigger_if(hit, CrisisTrigger::Pattern)
    }

    /// Emotion path: a single extreme sadness score
    pub fn check_emotion(&mut self, sad_score: f64) -> bool {
        self.trigger_if(exceeds_sad_threshold(sad_score), CrisisTrigger::Emotion)
    }

    /// Put back a state carried over from an earlier session
    pub fn restore(&mut self, state: CrisisState) {
        self.state = state;
    }

    /// Clear the flag, whatever raised it
    pub fn dismiss_crisis(&mut self) {
        if self.state.is_active {
            tracing::info!(
                "crisis state dismissed (trigger: {:?})",
                self.state.trigger
            );
        }
        self.state = CrisisState::inactive();
    }

    fn trigger_if(&mut self, hit: bool, trigger: CrisisTrigger) -> bool {
        if !hit {
            return false;
        }
        let now = self.clock.now();
        tracing::info!("crisis state activated by {} path", trigger);
        self.state = CrisisState::activated(trigger, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::emotion::{Emotion, EmotionVector};
    use crate::id::MoodEntryId;
    use crate::mood::{MoodIntensity, MoodLevel};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 22, 0, 0).unwrap()
    }

    fn monitor() -> (CrisisMonitor, ManualClock) {
        let clock = ManualClock::new(start());
        (CrisisMonitor::new(Arc::new(clock.clone())), clock)
    }

    fn sad_entry(sad: f64, minutes_ago: i64) -> MoodEntry {
        MoodEntry::new(
            MoodEntryId::generate(),
            start() - TimeDelta::minutes(minutes_ago),
            MoodLevel::Struggling,
            MoodIntensity::High,
            Some(EmotionVector::zero().with(Emotion::Sad, sad)),
            None,
        )
    }

    #[test]
    fn test_keyword_path() {
        let (mut monitor, _) = monitor();
        assert!(!monitor.check_text("I had a great day"));
        assert!(!monitor.is_active());

        assert!(monitor.check_text("I want to die"));
        assert_eq!(
            *monitor.state(),
            CrisisState::activated(CrisisTrigger::Keyword, start())
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        assert!(contains_crisis_keywords("Thinking about SELF-HARM again"));
        assert!(contains_crisis_keywords("there's no point living like this"));
        assert!(contains_crisis_keywords("I could <b>kill myself</b>"));
    }

    #[test]
    fn test_pattern_three_recent_samples_trigger() {
        let (mut monitor, _) = monitor();
        let entries = vec![sad_entry(0.9, 25), sad_entry(0.9, 15), sad_entry(0.9, 5)];
        assert!(monitor.check_mood_pattern(&entries));
        assert_eq!(monitor.state().trigger, Some(CrisisTrigger::Pattern));
    }

    #[test]
    fn test_pattern_two_samples_do_not_trigger() {
        let (mut monitor, _) = monitor();
        let entries = vec![sad_entry(0.9, 20), sad_entry(0.9, 10)];
        assert!(!monitor.check_mood_pattern(&entries));
        assert!(!monitor.is_active());
    }

    #[test]
    fn test_pattern_ignores_samples_older_than_an_hour() {
        let (mut monitor, _) = monitor();
        let entries = vec![sad_entry(0.9, 61), sad_entry(0.9, 20), sad_entry(0.9, 10)];
        assert!(!monitor.check_mood_pattern(&entries));
    }

    #[test]
    fn test_pattern_window_slides_with_clock() {
        let (mut monitor, clock) = monitor();
        let entries = vec![sad_entry(0.95, 50), sad_entry(0.95, 30), sad_entry(0.95, 1)];

        clock.advance(TimeDelta::minutes(15));
        assert!(!monitor.check_mood_pattern(&entries));

        clock.set(start());
        assert!(monitor.check_mood_pattern(&entries));
    }

    #[test]
    fn test_pattern_requires_extreme_sadness() {
        let samples = (0..5).map(|i| AffectSample {
            sad: SAD_THRESHOLD,
            timestamp: start() - TimeDelta::minutes(i),
        });
        assert!(!detect_crisis_pattern(samples, start()));
    }

    #[test]
    fn test_sample_at_cutoff_is_outside_window() {
        let at_cutoff = start() - TimeDelta::milliseconds(PATTERN_WINDOW_MS);
        let samples = [
            AffectSample { sad: 0.9, timestamp: at_cutoff },
            AffectSample { sad: 0.9, timestamp: start() },
            AffectSample { sad: 0.9, timestamp: start() },
        ];
        assert!(!detect_crisis_pattern(samples, start()));
    }

    #[test]
    fn test_emotion_threshold_is_strict() {
        let (mut monitor, _) = monitor();
        assert!(!monitor.check_emotion(0.85));
        assert!(!monitor.is_active());
        assert!(monitor.check_emotion(0.86));
        assert_eq!(monitor.state().trigger, Some(CrisisTrigger::Emotion));
    }

    #[test]
    fn test_active_state_survives_non_triggering_calls() {
        let (mut monitor, clock) = monitor();
        assert!(monitor.check_emotion(0.99));
        let activated = *monitor.state();

        clock.advance(TimeDelta::hours(3));
        assert!(!monitor.check_text("I had a great day"));
        assert!(!monitor.check_emotion(0.1));
        assert!(!monitor.check_mood_pattern(&[]));
        assert_eq!(*monitor.state(), activated);

        monitor.dismiss_crisis();
        assert_eq!(*monitor.state(), CrisisState::inactive());
        assert_eq!(monitor.state().trigger, None);
        assert_eq!(monitor.state().timestamp, None);
    }

    #[test]
    fn test_entries_without_vectors_are_ignored() {
        let entry = MoodEntry::new(
            MoodEntryId::generate(),
            start(),
            MoodLevel::Low,
            MoodIntensity::Low,
            None,
            None,
        );
        assert_eq!(affect_samples(&[entry]).count(), 0);
    }
}
