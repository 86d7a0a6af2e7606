//! Voice companion loop
//!
//! Speech recognition and synthesis are opaque collaborators: one yields a
//! transcript, the other speaks a string. The loop itself only decides what
//! to do with the transcript.

use async_trait::async_trait;
use serde::Serialize;

use crate::crisis::{CRISIS_RESPONSE, CrisisResponse};
use crate::error::Result;
use crate::mood::MoodLevel;
use crate::response::{CompanionResponse, VOICE_PROMPTS};
use crate::session::Session;

/// Produces the transcript of one utterance
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn listen(&self) -> Result<String>;
}

/// Speaks a reply aloud
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    Processing,
    Speaking,
}

/// What happened to one utterance
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOutcome {
    /// Nothing was said
    Silent,
    /// A crisis phrase was heard; nothing is spoken and the crisis flag is up
    Crisis(CrisisResponse),
    /// A reply was composed and handed to speech synthesis
    Replied(CompanionResponse),
}

/// Drives one voice conversation against a session
#[derive(Debug)]
pub struct VoiceCompanion<T> {
    tts: T,
    state: VoiceState,
    last_response: String,
}

impl<T: TextToSpeech> VoiceCompanion<T> {
    pub fn new(tts: T) -> Self {
        Self {
            tts,
            state: VoiceState::Idle,
            last_response: VOICE_PROMPTS.greeting.to_string(),
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// The last thing the companion said (the greeting before any reply)
    pub fn last_response(&self) -> &str {
        &self.last_response
    }

    pub fn start_listening(&mut self) {
        self.state = VoiceState::Listening;
    }

    /// Handle a finished utterance
    ///
    /// The raw transcript goes through the crisis keyword path before anything
    /// else. Speech failures are logged and the companion returns to idle.
    pub async fn finish_listening(&mut self, session: &mut Session, transcript: &str) -> VoiceOutcome {
        if transcript.trim().is_empty() {
            self.state = VoiceState::Idle;
            return VoiceOutcome::Silent;
        }

        self.state = VoiceState::Processing;
        // An active crisis silences generated replies until it is dismissed
        if session.check_text(transcript) || session.crisis_state().is_active {
            self.state = VoiceState::Idle;
            return VoiceOutcome::Crisis(CRISIS_RESPONSE);
        }

        let response = session.respond(MoodLevel::Okay, Some(transcript));
        self.last_response = response.message.clone();

        self.state = VoiceState::Speaking;
        if let Err(e) = self.tts.speak(&response.message).await {
            tracing::warn!("Speech synthesis failed: {:?}", e);
        }
        self.state = VoiceState::Idle;

        VoiceOutcome::Replied(response)
    }

    /// Listen for one utterance and handle it
    pub async fn converse<S: SpeechToText + ?Sized>(
        &mut self,
        session: &mut Session,
        stt: &S,
    ) -> VoiceOutcome {
        self.start_listening();
        match stt.listen().await {
            Ok(transcript) => self.finish_listening(session, &transcript).await,
            Err(e) => {
                tracing::warn!("Speech recognition failed: {:?}", e);
                self.state = VoiceState::Idle;
                VoiceOutcome::Silent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::MemoryStore;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Default, Clone)]
    struct RecordingSpeaker {
        spoken: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl TextToSpeech for RecordingSpeaker {
        async fn speak(&self, text: &str) -> Result<()> {
            self.spoken.lock().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenSpeaker;

    #[async_trait]
    impl TextToSpeech for BrokenSpeaker {
        async fn speak(&self, _text: &str) -> Result<()> {
            Err(CoreError::speech_failed("text-to-speech", "no audio device"))
        }
    }

    struct Scripted(&'static str);

    #[async_trait]
    impl SpeechToText for Scripted {
        async fn listen(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    async fn session() -> Session {
        Session::builder(Arc::new(MemoryStore::new()))
            .seed(3)
            .build()
            .await
    }

    #[tokio::test]
    async fn test_reply_is_spoken() {
        let speaker = RecordingSpeaker::default();
        let mut voice = VoiceCompanion::new(speaker.clone());
        let mut session = session().await;

        let outcome = voice
            .converse(&mut session, &Scripted("work has been a lot lately"))
            .await;

        let VoiceOutcome::Replied(response) = outcome else {
            panic!("expected a reply, got {outcome:?}");
        };
        assert_eq!(voice.state(), VoiceState::Idle);
        assert_eq!(voice.last_response(), response.message);
        assert_eq!(speaker.spoken.lock().as_slice(), [response.message.clone()]);
        assert!(!session.crisis_state().is_active);
    }

    #[tokio::test]
    async fn test_crisis_phrase_is_never_answered() {
        let speaker = RecordingSpeaker::default();
        let mut voice = VoiceCompanion::new(speaker.clone());
        let mut session = session().await;

        voice.start_listening();
        let outcome = voice
            .finish_listening(&mut session, "honestly I want to die")
            .await;

        assert_eq!(outcome, VoiceOutcome::Crisis(CRISIS_RESPONSE));
        assert!(speaker.spoken.lock().is_empty());
        assert!(session.crisis_state().is_active);
        assert_eq!(voice.last_response(), VOICE_PROMPTS.greeting);
    }

    #[tokio::test]
    async fn test_active_crisis_silences_replies() {
        let speaker = RecordingSpeaker::default();
        let mut voice = VoiceCompanion::new(speaker.clone());
        let mut session = session().await;
        session.check_emotion(0.95);

        let outcome = voice.finish_listening(&mut session, "feeling a bit better").await;
        assert_eq!(outcome, VoiceOutcome::Crisis(CRISIS_RESPONSE));
        assert!(speaker.spoken.lock().is_empty());

        session.dismiss_crisis();
        let outcome = voice.finish_listening(&mut session, "feeling a bit better").await;
        assert!(matches!(outcome, VoiceOutcome::Replied(_)));
    }

    #[tokio::test]
    async fn test_silence_returns_to_idle() {
        let mut voice = VoiceCompanion::new(RecordingSpeaker::default());
        let mut session = session().await;
        voice.start_listening();
        assert_eq!(voice.state(), VoiceState::Listening);
        assert_eq!(voice.finish_listening(&mut session, "   ").await, VoiceOutcome::Silent);
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[tokio::test]
    async fn test_speech_failure_still_replies() {
        let mut voice = VoiceCompanion::new(BrokenSpeaker);
        let mut session = session().await;
        let outcome = voice.finish_listening(&mut session, "long day").await;
        assert!(matches!(outcome, VoiceOutcome::Replied(_)));
        assert_eq!(voice.state(), VoiceState::Idle);
    }
}
