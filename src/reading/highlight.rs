use crate::reading::segmenter::tokenize;
use crate::reading::token::Token;
use std::fmt;

/// Identity of one playback; boundary events carry it so late events from a
/// replaced utterance can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State for one spoken sentence.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub id: SessionId,
    pub sentence: String,
    pub tokens: Vec<Token>,
    /// Sentence length in chars; the upper bound of the last token.
    pub length: usize,
    pub highlighted: Option<usize>,
    pub active: bool,
}

/// Finds the token whose span `[start, next start)` contains `offset`.
pub fn token_index_at(tokens: &[Token], length: usize, offset: usize) -> Option<usize> {
    if offset >= length {
        return None;
    }
    let after = tokens.partition_point(|token| token.start <= offset);
    after.checked_sub(1)
}

/// Maps speech-engine boundary offsets to the token being spoken.
pub struct HighlightSynchronizer {
    session: Option<PlaybackSession>,
    next_id: u64,
}

impl HighlightSynchronizer {
    pub fn new() -> Self {
        Self {
            session: None,
            next_id: 1,
        }
    }

    /// Starts a session for `sentence`, replacing whatever was playing.
    pub fn begin(&mut self, sentence: &str) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;

        if let Some(previous) = self.session.as_ref().filter(|s| s.active) {
            log::debug!("session {} replaced by {}", previous.id, id);
        }

        let tokens = tokenize(sentence);
        let length = tokens.last().map_or(0, Token::end);
        self.session = Some(PlaybackSession {
            id,
            sentence: sentence.to_string(),
            tokens,
            length,
            highlighted: None,
            active: true,
        });
        id
    }

    /// Applies a word boundary and returns the highlighted index afterwards.
    ///
    /// Offsets that match no token keep the previous highlight.
    pub fn on_boundary(&mut self, id: SessionId, reported_offset: usize) -> Option<usize> {
        let session = match self.session.as_mut() {
            Some(session) if session.active && session.id == id => session,
            _ => {
                log::trace!("dropping boundary for stale session {}", id);
                return self.highlighted();
            }
        };

        if let Some(index) = token_index_at(&session.tokens, session.length, reported_offset) {
            session.highlighted = Some(index);
        }
        session.highlighted
    }

    /// Ends the session `id` when the engine reports completion.
    pub fn end(&mut self, id: SessionId) {
        if let Some(session) = self.session.as_mut() {
            if session.id == id {
                session.active = false;
                session.highlighted = None;
            }
        }
    }

    /// Stops the current session regardless of identity.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.active = false;
            session.highlighted = None;
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.session.as_ref().filter(|s| s.active).map(|s| s.id)
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.active)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.highlighted)
    }

    pub fn highlighted_token(&self) -> Option<&Token> {
        let session = self.session.as_ref()?;
        session.highlighted.and_then(|idx| session.tokens.get(idx))
    }
}

impl Default for HighlightSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
