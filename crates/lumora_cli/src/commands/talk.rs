use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use lumora_core::error::CoreError;
use lumora_core::response::{PRIVACY_DISCLAIMER, VOICE_PROMPTS};
use lumora_core::{LumoraConfig, SpeechToText, TextToSpeech, VoiceCompanion, VoiceOutcome};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use super::Companion;
use crate::output::Output;

/// Treats each line typed on stdin as one utterance
#[derive(Debug)]
pub struct StdinTranscripts {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    closed: AtomicBool,
}

impl StdinTranscripts {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl Default for StdinTranscripts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechToText for StdinTranscripts {
    async fn listen(&self) -> lumora_core::Result<String> {
        let next = self
            .lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| CoreError::speech_failed("speech-to-text", e.to_string()))?;

        match next {
            Some(line) => Ok(line),
            None => {
                self.closed.store(true, Ordering::Relaxed);
                Ok(String::new())
            }
        }
    }
}

/// Prints replies instead of speaking them
#[derive(Debug, Default)]
pub struct ConsoleVoice;

#[async_trait]
impl TextToSpeech for ConsoleVoice {
    async fn speak(&self, text: &str) -> lumora_core::Result<()> {
        println!("{} {}", "Lumora:".bright_magenta().bold(), text);
        Ok(())
    }
}

/// Text-mode stand-in for the voice space
pub async fn run(companion: &mut Companion, config: &LumoraConfig) -> miette::Result<()> {
    let output = Output::new();

    if !config.user.enable_voice {
        output.warning("Voice is off. Set `enable_voice = true` under [user] in your config to use it.");
        return Ok(());
    }

    output.section("Voice");
    output.status(PRIVACY_DISCLAIMER);
    println!();

    let stt = StdinTranscripts::new();
    let mut voice = VoiceCompanion::new(ConsoleVoice);
    println!("{} {}", "Lumora:".bright_magenta().bold(), voice.last_response());
    output.status(VOICE_PROMPTS.listening);

    loop {
        match voice.converse(&mut companion.session, &stt).await {
            VoiceOutcome::Silent if stt.is_closed() => break,
            VoiceOutcome::Silent => continue,
            VoiceOutcome::Replied(_) => {}
            VoiceOutcome::Crisis(response) => {
                output.crisis(&response);
                return Ok(());
            }
        }
    }

    println!("{} {}", "Lumora:".bright_magenta().bold(), VOICE_PROMPTS.closing);
    Ok(())
}
