// Paced boundary clock - estimates word timing from the speech rate

use crate::engine::config::PacingConfig;
use crate::reading::{segment, SessionId, TokenKind};
use crate::speech::driver::{
    BoundaryEvent, BoundaryName, SpeechDriver, SpeechError, SpeechEvent, SpeechEventKind,
    SpeechRequest, Voice,
};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const CANCEL_POLL: Duration = Duration::from_millis(10);

pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    (60_000.0 / wpm.max(1) as f64).round() as u64
}

/// Words per minute the clock runs at for a given playback rate.
pub fn effective_wpm(config: &PacingConfig, rate: f32) -> u32 {
    let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
    ((config.base_wpm as f32) * rate).round().max(1.0) as u32
}

/// Boundary times for one utterance, measured from the start of speech.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacing {
    pub boundaries: Vec<(Duration, BoundaryEvent)>,
    pub total: Duration,
}

/// Lays out a word boundary at the start of every word, holding each word
/// for one beat (longer for long words) and pausing after punctuation.
pub fn pace(text: &str, rate: f32, config: &PacingConfig) -> Pacing {
    pace_at_wpm(text, effective_wpm(config, rate), config)
}

/// Like [`pace`], with the words-per-minute given directly. Used when the
/// speaking program has its own notion of speed.
pub fn pace_at_wpm(text: &str, wpm: u32, config: &PacingConfig) -> Pacing {
    let beat_ms = wpm_to_milliseconds(wpm) as f64;
    let mut elapsed_ms = 0.0_f64;
    let mut boundaries = Vec::new();

    for token in segment(text) {
        match token.kind {
            TokenKind::Word => {
                let char_length = token.len();
                boundaries.push((
                    Duration::from_millis(elapsed_ms.round() as u64),
                    BoundaryEvent {
                        name: BoundaryName::Word,
                        char_index: token.start,
                        char_length,
                    },
                ));
                let penalty = if char_length > config.long_word_threshold {
                    config.long_word_penalty
                } else {
                    1.0
                };
                elapsed_ms += beat_ms * penalty;
            }
            TokenKind::Separator => {
                let multiplier = token
                    .text
                    .chars()
                    .map(|c| match c {
                        '.' | '!' | '?' => config.sentence_pause_multiplier,
                        ',' | ';' | ':' => config.clause_pause_multiplier,
                        _ => 1.0,
                    })
                    .fold(1.0, f64::max);
                elapsed_ms += beat_ms * (multiplier - 1.0);
            }
        }
    }

    Pacing {
        boundaries,
        total: Duration::from_millis(elapsed_ms.round() as u64),
    }
}

fn sleep_until(deadline: Instant, cancelled: &AtomicBool) -> bool {
    loop {
        if cancelled.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(CANCEL_POLL));
    }
}

/// Runs the boundary clock on a background thread.
///
/// Returns the cancel flag; once set, the thread sends nothing further.
pub(crate) fn spawn_clock(
    session: SessionId,
    pacing: Pacing,
    events: Sender<SpeechEvent>,
    send_end: bool,
) -> Arc<AtomicBool> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    thread::spawn(move || {
        let start = Instant::now();
        for (at, boundary) in pacing.boundaries {
            if !sleep_until(start + at, &flag) {
                return;
            }
            let event = SpeechEvent {
                session,
                kind: SpeechEventKind::Boundary(boundary),
            };
            if events.send(event).is_err() {
                return;
            }
        }
        if send_end && sleep_until(start + pacing.total, &flag) {
            let _ = events.send(SpeechEvent::end(session));
        }
    });

    cancelled
}

/// Silent driver: no audio, only estimated word boundaries.
pub struct PacedDriver {
    config: PacingConfig,
    in_flight: Option<Arc<AtomicBool>>,
}

impl PacedDriver {
    pub fn new(config: PacingConfig) -> Self {
        Self {
            config,
            in_flight: None,
        }
    }
}

impl SpeechDriver for PacedDriver {
    fn name(&self) -> &str {
        "silent"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(
        &mut self,
        session: SessionId,
        request: &SpeechRequest,
        events: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        self.cancel();
        let pacing = pace(&request.text, request.rate, &self.config);
        self.in_flight = Some(spawn_clock(session, pacing, events, true));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(flag) = self.in_flight.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for PacedDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}
