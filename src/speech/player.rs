use crate::reading::{HighlightSynchronizer, PlaybackSession, SessionId};
use crate::speech::driver::{
    select_french_voice, BoundaryName, SpeechDriver, SpeechError, SpeechEvent, SpeechEventKind,
    SpeechRequest, Voice,
};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Couples a speech driver with the highlight synchronizer.
///
/// Lives on the UI thread. Driver callbacks queue up on the channel and are
/// applied by [`Player::pump`], so all highlight state changes happen here.
pub struct Player {
    driver: Box<dyn SpeechDriver>,
    sync: HighlightSynchronizer,
    voice: Option<Voice>,
    pitch: f32,
    events_tx: Sender<SpeechEvent>,
    events_rx: Receiver<SpeechEvent>,
}

impl Player {
    pub fn new(driver: Box<dyn SpeechDriver>, pitch: f32) -> Self {
        let voice = select_french_voice(&driver.voices());
        match &voice {
            Some(v) => log::info!("speech driver `{}` using voice {}", driver.name(), v.name),
            None => log::info!("speech driver `{}` using default voice", driver.name()),
        }
        let (events_tx, events_rx) = unbounded();
        Self {
            driver,
            sync: HighlightSynchronizer::new(),
            voice,
            pitch,
            events_tx,
            events_rx,
        }
    }

    pub fn driver_name(&self) -> &str {
        self.driver.name()
    }

    pub fn is_supported(&self) -> bool {
        self.driver.is_available()
    }

    /// Speaks `text`, cancelling anything already playing first.
    ///
    /// `Unsupported` is recoverable: the caller carries on without audio.
    pub fn play(&mut self, text: &str, rate: f32) -> Result<SessionId, SpeechError> {
        self.stop();
        if !self.driver.is_available() {
            return Err(SpeechError::Unsupported);
        }

        let session = self.sync.begin(text);
        let request = SpeechRequest::french(text, rate, self.pitch).with_voice(self.voice.clone());
        match self.driver.speak(session, &request, self.events_tx.clone()) {
            Ok(()) => {
                log::debug!("session {} speaking {:?} at rate {}", session, text, rate);
                Ok(session)
            }
            Err(e) => {
                self.sync.cancel();
                Err(e)
            }
        }
    }

    /// Stops playback and clears the highlight.
    pub fn stop(&mut self) {
        if self.sync.is_active() {
            log::debug!("stopping session {:?}", self.sync.current_id());
        }
        self.driver.cancel();
        self.sync.cancel();
    }

    /// Applies every queued driver event. Returns true if anything changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    fn apply(&mut self, event: SpeechEvent) -> bool {
        let before = (self.sync.highlighted(), self.sync.is_active());
        match event.kind {
            SpeechEventKind::Boundary(boundary) if boundary.name == BoundaryName::Word => {
                self.sync.on_boundary(event.session, boundary.char_index);
            }
            SpeechEventKind::Boundary(_) => {}
            SpeechEventKind::End => {
                self.sync.end(event.session);
            }
        }
        before != (self.sync.highlighted(), self.sync.is_active())
    }

    pub fn is_speaking(&self) -> bool {
        self.sync.is_active()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.sync.highlighted()
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.sync.session()
    }

    /// Feeds an event as if the driver had sent it.
    pub fn inject(&self, event: SpeechEvent) {
        let _ = self.events_tx.send(event);
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.driver.cancel();
    }
}
