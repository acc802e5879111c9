//! Speech driver contract
//!
//! A driver wraps a host text-to-speech engine. It accepts one utterance at a
//! time and reports progress as [`SpeechEvent`]s sent over a channel, tagged
//! with the session that requested them. The driver never touches highlight
//! state itself; the UI thread drains the channel and applies events.

use crate::reading::SessionId;
use crossbeam_channel::Sender;
use thiserror::Error;

/// Fixed language tag for every utterance.
pub const FRENCH_LANGUAGE: &str = "fr-FR";

/// Rate used when pronouncing a single looked-up word.
pub const PRONUNCIATION_RATE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("text-to-speech is not supported on this host")]
    Unsupported,

    #[error("failed to start speech engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("speech engine error: {0}")]
    Engine(String),
}

impl SpeechError {
    /// Unsupported hosts keep working without audio or highlighting.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, SpeechError::Unsupported)
    }
}

/// A voice installed on the host engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<Voice>,
}

impl SpeechRequest {
    pub fn french(text: &str, rate: f32, pitch: f32) -> Self {
        Self {
            text: text.to_string(),
            language: FRENCH_LANGUAGE.to_string(),
            rate,
            pitch,
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: Option<Voice>) -> Self {
        self.voice = voice;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryName {
    Word,
    Sentence,
}

/// Position of the word (or sentence) the engine is about to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryEvent {
    pub name: BoundaryName,
    pub char_index: usize,
    pub char_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEventKind {
    Boundary(BoundaryEvent),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechEvent {
    pub session: SessionId,
    pub kind: SpeechEventKind,
}

impl SpeechEvent {
    pub fn word(session: SessionId, char_index: usize, char_length: usize) -> Self {
        Self {
            session,
            kind: SpeechEventKind::Boundary(BoundaryEvent {
                name: BoundaryName::Word,
                char_index,
                char_length,
            }),
        }
    }

    pub fn end(session: SessionId) -> Self {
        Self {
            session,
            kind: SpeechEventKind::End,
        }
    }
}

/// Host text-to-speech engine.
///
/// `speak` returns as soon as the utterance is queued; progress arrives on
/// `events`. `cancel` stops the in-flight utterance, after which the driver
/// sends nothing more for it.
pub trait SpeechDriver: Send {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    fn voices(&self) -> Vec<Voice>;

    fn speak(
        &mut self,
        session: SessionId,
        request: &SpeechRequest,
        events: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError>;

    fn cancel(&mut self);
}

/// Picks the first French voice: language tag starting with `fr`, or a name
/// mentioning French.
pub fn select_french_voice(voices: &[Voice]) -> Option<Voice> {
    voices
        .iter()
        .find(|voice| {
            voice.language.to_lowercase().starts_with("fr")
                || voice.name.to_lowercase().contains("french")
        })
        .cloned()
}

/// Driver for hosts without any speech engine.
pub struct UnavailableDriver;

impl SpeechDriver for UnavailableDriver {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(
        &mut self,
        _session: SessionId,
        _request: &SpeechRequest,
        _events: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn cancel(&mut self) {}
}
