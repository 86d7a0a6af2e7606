//! Companion session
//!
//! A [`Session`] owns everything that used to be ambient state: the loaded
//! mood history, the crisis flag, the clock and the random source. Every
//! engine call goes through it, so two sessions never share state.

use std::sync::Arc;

use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::crisis::{CRISIS_RESPONSE, CrisisMonitor, CrisisResponse, CrisisState, CrisisTrigger};
use crate::emotion::EmotionVector;
use crate::error::Result;
use crate::id::{MoodEntryId, SessionId};
use crate::mood::{MoodEntry, MoodIntensity, MoodLevel};
use crate::response::{CompanionResponse, compose_response};
use crate::store::{KeyValueStore, MoodHistoryStore};

/// A session shared between tasks
///
/// The mutex makes every check-then-set on the crisis flag atomic.
pub type SharedSession = Arc<Mutex<Session>>;

/// One check-in as submitted by the user
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub mood: MoodLevel,
    pub intensity: MoodIntensity,
    pub reflection: Option<String>,
    pub emotion_vector: Option<EmotionVector>,
}

impl CheckIn {
    pub fn new(mood: MoodLevel, intensity: MoodIntensity) -> Self {
        Self {
            mood,
            intensity,
            reflection: None,
            emotion_vector: None,
        }
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    pub fn with_emotions(mut self, vector: EmotionVector) -> Self {
        self.emotion_vector = Some(vector);
        self
    }
}

/// Result of a check-in
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// The entry was recorded and a reply composed
    Recorded {
        entry: MoodEntry,
        response: CompanionResponse,
    },
    /// The crisis flag went up. `entry` is `None` when the reflection itself
    /// tripped the keyword path, in which case nothing was stored.
    Crisis {
        trigger: CrisisTrigger,
        entry: Option<MoodEntry>,
        response: CrisisResponse,
    },
}

/// Builder for [`Session`]
#[derive(Debug)]
pub struct SessionBuilder {
    store: Arc<dyn KeyValueStore>,
    clock: Option<Arc<dyn Clock>>,
    rng: Option<StdRng>,
}

impl SessionBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Seed the random source, for reproducible ids and replies
    pub fn seed(self, seed: u64) -> Self {
        self.rng(StdRng::seed_from_u64(seed))
    }

    /// Build the session, loading any stored history
    ///
    /// Unreadable history is logged and replaced with an empty one.
    pub async fn build(self) -> Session {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let mut rng = self.rng.unwrap_or_else(StdRng::from_os_rng);
        let history = MoodHistoryStore::new(self.store);
        let entries = history.load_or_empty().await;
        let id = SessionId::generate_with(&mut rng);

        tracing::debug!("session {} started with {} entries", id, entries.len());
        Session {
            id,
            crisis: CrisisMonitor::new(clock.clone()),
            clock,
            rng,
            history,
            entries,
        }
    }
}

/// Stateful shell around the verification and crisis engines
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    history: MoodHistoryStore,
    entries: Vec<MoodEntry>,
    crisis: CrisisMonitor,
}

impl Session {
    pub fn builder(store: Arc<dyn KeyValueStore>) -> SessionBuilder {
        SessionBuilder {
            store,
            clock: None,
            rng: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Entries newer than `hours` before now
    ///
    /// A window reaching past the earliest representable time covers every
    /// entry.
    pub fn recent_moods(&self, hours: u32) -> Vec<&MoodEntry> {
        let cutoff = TimeDelta::try_hours(i64::from(hours))
            .and_then(|window| self.clock.now().checked_sub_signed(window));
        self.entries
            .iter()
            .filter(|e| cutoff.is_none_or(|cutoff| e.timestamp() > cutoff))
            .collect()
    }

    pub fn crisis_state(&self) -> &CrisisState {
        self.crisis.state()
    }

    pub fn check_text(&mut self, text: &str) -> bool {
        self.crisis.check_text(text)
    }

    pub fn check_emotion(&mut self, sad_score: f64) -> bool {
        self.crisis.check_emotion(sad_score)
    }

    /// Run the pattern path over this session's history
    pub fn check_mood_pattern(&mut self) -> bool {
        self.crisis.check_mood_pattern(&self.entries)
    }

    /// Carry a crisis flag over from a previous session
    pub fn restore_crisis(&mut self, state: CrisisState) {
        if state.is_active {
            tracing::debug!("restoring active crisis state ({:?})", state.trigger);
        }
        self.crisis.restore(state);
    }

    pub fn dismiss_crisis(&mut self) {
        self.crisis.dismiss_crisis();
    }

    /// Compose a reply using the session's random source
    pub fn respond(&mut self, mood: MoodLevel, context: Option<&str>) -> CompanionResponse {
        compose_response(mood, context, &mut self.rng)
    }

    /// Record a check-in
    ///
    /// The raw reflection is scanned for crisis phrases before it is
    /// sanitized or stored; a hit stores nothing. Otherwise the entry is
    /// appended and persisted, and the emotion and pattern paths run on the
    /// new data. Persistence failures are logged, not returned: the entry
    /// stays in memory for the rest of the session.
    pub async fn check_in(&mut self, check_in: CheckIn) -> CheckInOutcome {
        if let Some(reflection) = check_in.reflection.as_deref() {
            if self.crisis.check_text(reflection) {
                return CheckInOutcome::Crisis {
                    trigger: CrisisTrigger::Keyword,
                    entry: None,
                    response: CRISIS_RESPONSE,
                };
            }
        }

        let emotion_hit = check_in
            .emotion_vector
            .is_some_and(|v| self.crisis.check_emotion(v.sad()));

        let entry = MoodEntry::new(
            MoodEntryId::generate_with(&mut self.rng),
            self.clock.now(),
            check_in.mood,
            check_in.intensity,
            check_in.emotion_vector,
            check_in.reflection.as_deref(),
        );
        tracing::debug!(
            "recorded {} check-in {} ({})",
            entry.user_mood(),
            entry.id(),
            entry.verification()
        );
        self.entries.push(entry.clone());

        if let Err(e) = self.persist().await {
            tracing::error!("Failed to save mood history: {:?}", e);
        }

        let pattern_hit = self.crisis.check_mood_pattern(&self.entries);

        let trigger = if pattern_hit {
            Some(CrisisTrigger::Pattern)
        } else if emotion_hit {
            Some(CrisisTrigger::Emotion)
        } else {
            None
        };

        match trigger {
            Some(trigger) => CheckInOutcome::Crisis {
                trigger,
                entry: Some(entry),
                response: CRISIS_RESPONSE,
            },
            None => {
                let response =
                    compose_response(check_in.mood, check_in.reflection.as_deref(), &mut self.rng);
                CheckInOutcome::Recorded { entry, response }
            }
        }
    }

    /// Write the in-memory history to the store
    pub async fn persist(&self) -> Result<()> {
        self.history.save(&self.entries).await
    }

    /// Delete every entry, in memory and on disk
    pub async fn clear_history(&mut self) -> Result<()> {
        self.entries.clear();
        self.history.clear().await?;
        tracing::info!("mood history cleared");
        Ok(())
    }

    /// Generate an anonymous id from the session's random source
    pub fn generate_entry_id(&mut self) -> MoodEntryId {
        MoodEntryId::generate_with(&mut self.rng)
    }
}
