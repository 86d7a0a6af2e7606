//! Lumora Core - mood verification and crisis detection
//!
//! This crate holds the decision engines behind Lumora's check-ins: checking a
//! self-reported mood against detected emotion, spotting crisis signals in
//! text and affect history, and keeping a local mood history. Everything that
//! touches the user's words or scores stays inside the [`Session`].

pub mod clock;
pub mod config;
pub mod crisis;
pub mod emotion;
pub mod error;
pub mod id;
pub mod mood;
pub mod privacy;
pub mod response;
pub mod ritual;
pub mod sanitize;
pub mod session;
pub mod space;
pub mod store;
pub mod verification;
pub mod voice;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LumoraConfig;
pub use crisis::{CRISIS_RESPONSE, CrisisMonitor, CrisisResponse, CrisisState, CrisisTrigger};
pub use emotion::{Emotion, EmotionVector};
pub use error::{CoreError, Result, ValidationError};
pub use id::{Id, IdType, MoodEntryId, SessionId};
pub use mood::{MoodEntry, MoodIntensity, MoodLevel, MoodVerification};
pub use privacy::{SafeMoodData, validate_safe_mood_data};
pub use response::{CompanionResponse, compose_response};
pub use sanitize::sanitize_reflection;
pub use session::{CheckIn, CheckInOutcome, Session, SessionBuilder, SharedSession};
pub use store::{FileStore, KeyValueStore, MemoryStore, MoodHistoryStore};
pub use verification::verify;
pub use voice::{SpeechToText, TextToSpeech, VoiceCompanion, VoiceOutcome, VoiceState};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CheckIn, CheckInOutcome, Clock, CompanionResponse, CoreError, CrisisState, CrisisTrigger,
        Emotion, EmotionVector, KeyValueStore, LumoraConfig, MoodEntry, MoodIntensity, MoodLevel,
        MoodVerification, Result, Session,
    };
}
