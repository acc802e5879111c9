// Host speech programs (espeak-ng, spd-say) driven as child processes

use crate::engine::config::PacingConfig;
use crate::reading::SessionId;
use crate::speech::driver::{SpeechDriver, SpeechError, SpeechEvent, SpeechRequest, Voice};
use crate::speech::paced::{pace_at_wpm, spawn_clock};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const EXIT_POLL: Duration = Duration::from_millis(20);
const ESPEAK_DEFAULT_WPM: f32 = 175.0;
const ESPEAK_MIN_WPM: f32 = 80.0;
const ESPEAK_MAX_WPM: f32 = 450.0;

/// Which command-line speech program to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostEngine {
    Espeak,
    SpeechDispatcher,
}

impl HostEngine {
    pub fn default_program(&self) -> &'static str {
        match self {
            HostEngine::Espeak => "espeak-ng",
            HostEngine::SpeechDispatcher => "spd-say",
        }
    }

    /// Speed the program actually speaks at for `rate`. The boundary clock
    /// runs at this speed so the highlight keeps up with the audio.
    ///
    /// spd-say's `-r` is a percentage offset over the output module's
    /// default speed, which is espeak-ng's 175 wpm on stock installs.
    pub fn words_per_minute(&self, rate: f32) -> u32 {
        match self {
            HostEngine::Espeak => (ESPEAK_DEFAULT_WPM * rate)
                .round()
                .clamp(ESPEAK_MIN_WPM, ESPEAK_MAX_WPM) as u32,
            HostEngine::SpeechDispatcher => {
                let offset = spd_rate(rate) as f32;
                (ESPEAK_DEFAULT_WPM * (1.0 + offset / 100.0)).round().max(1.0) as u32
            }
        }
    }

    /// Arguments speaking `request` and exiting once audio is done.
    pub fn speak_args(&self, request: &SpeechRequest) -> Vec<String> {
        let language = request
            .language
            .split('-')
            .next()
            .unwrap_or("fr")
            .to_lowercase();

        match self {
            HostEngine::Espeak => {
                let voice = request
                    .voice
                    .as_ref()
                    .map(|v| v.id.clone())
                    .unwrap_or(language);
                let wpm = self.words_per_minute(request.rate);
                let pitch = (request.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
                vec![
                    "-v".to_string(),
                    voice,
                    "-s".to_string(),
                    wpm.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    request.text.clone(),
                ]
            }
            HostEngine::SpeechDispatcher => {
                let rate = spd_rate(request.rate);
                let pitch = ((request.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
                let mut args = vec![
                    "-w".to_string(),
                    "-l".to_string(),
                    language,
                    "-r".to_string(),
                    rate.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                ];
                if let Some(voice) = &request.voice {
                    args.push("-y".to_string());
                    args.push(voice.id.clone());
                }
                args.push(request.text.clone());
                args
            }
        }
    }

    pub fn voice_list_args(&self) -> &'static [&'static str] {
        match self {
            HostEngine::Espeak => &["--voices"],
            HostEngine::SpeechDispatcher => &["-L"],
        }
    }

    /// Parses the program's voice table, skipping the header row.
    pub fn parse_voices(&self, output: &str) -> Vec<Voice> {
        output
            .lines()
            .skip(1)
            .filter_map(|line| {
                let cols: Vec<&str> = line.split_whitespace().collect();
                match self {
                    HostEngine::Espeak if cols.len() >= 4 => Some(Voice {
                        id: cols[1].to_string(),
                        name: cols[3].replace('_', " "),
                        language: cols[1].to_string(),
                    }),
                    HostEngine::SpeechDispatcher if cols.len() >= 2 => Some(Voice {
                        id: cols[0].to_string(),
                        name: cols[0].to_string(),
                        language: cols[1].to_string(),
                    }),
                    _ => None,
                }
            })
            .collect()
    }
}

fn spd_rate(rate: f32) -> i32 {
    ((rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32
}

/// True if `program` is a path to a file or names a file on `PATH`.
pub fn program_on_path(program: &str) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

struct Utterance {
    cancelled: Arc<AtomicBool>,
    clock: Arc<AtomicBool>,
    child: Arc<Mutex<Option<Child>>>,
}

impl Utterance {
    fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.clock.store(true, Ordering::SeqCst);
        if let Ok(mut guard) = self.child.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

/// Speaks through an external program; word boundaries come from the paced
/// clock since these programs do not report them.
pub struct CommandDriver {
    engine: HostEngine,
    program: String,
    pacing: PacingConfig,
    available: bool,
    in_flight: Option<Utterance>,
}

impl CommandDriver {
    pub fn new(engine: HostEngine, program: Option<String>, pacing: PacingConfig) -> Self {
        let program = program.unwrap_or_else(|| engine.default_program().to_string());
        let available = program_on_path(&program);
        if !available {
            log::info!("speech program `{}` not found", program);
        }
        Self {
            engine,
            program,
            pacing,
            available,
            in_flight: None,
        }
    }

    pub fn engine(&self) -> HostEngine {
        self.engine
    }
}

fn watch_exit(session: SessionId, utterance: &Utterance, events: Sender<SpeechEvent>) {
    let cancelled = Arc::clone(&utterance.cancelled);
    let clock = Arc::clone(&utterance.clock);
    let child = Arc::clone(&utterance.child);

    thread::spawn(move || loop {
        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        let finished = match child.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(process) => !matches!(process.try_wait(), Ok(None)),
                None => true,
            },
            Err(_) => true,
        };
        if finished {
            clock.store(true, Ordering::SeqCst);
            if !cancelled.load(Ordering::SeqCst) {
                let _ = events.send(SpeechEvent::end(session));
            }
            return;
        }
        thread::sleep(EXIT_POLL);
    });
}

impl SpeechDriver for CommandDriver {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn voices(&self) -> Vec<Voice> {
        if !self.available {
            return Vec::new();
        }
        match Command::new(&self.program)
            .args(self.engine.voice_list_args())
            .output()
        {
            Ok(output) => self
                .engine
                .parse_voices(&String::from_utf8_lossy(&output.stdout)),
            Err(e) => {
                log::warn!("could not list voices from `{}`: {}", self.program, e);
                Vec::new()
            }
        }
    }

    fn speak(
        &mut self,
        session: SessionId,
        request: &SpeechRequest,
        events: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        self.cancel();
        if !self.available {
            return Err(SpeechError::Unsupported);
        }

        let child = Command::new(&self.program)
            .args(self.engine.speak_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let wpm = self.engine.words_per_minute(request.rate);
        let pacing = pace_at_wpm(&request.text, wpm, &self.pacing);
        let utterance = Utterance {
            cancelled: Arc::new(AtomicBool::new(false)),
            clock: spawn_clock(session, pacing, events.clone(), false),
            child: Arc::new(Mutex::new(Some(child))),
        };
        watch_exit(session, &utterance, events);
        self.in_flight = Some(utterance);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(utterance) = self.in_flight.take() {
            utterance.stop();
        }
    }
}

impl Drop for CommandDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::paced::wpm_to_milliseconds;
    use crate::storage::SpeechRate;

    #[test]
    fn test_espeak_args() {
        let request = SpeechRequest::french("Bonjour", 1.0, 1.0);
        let args = HostEngine::Espeak.speak_args(&request);
        assert_eq!(args, vec!["-v", "fr", "-s", "175", "-p", "50", "Bonjour"]);
    }

    #[test]
    fn test_clock_stays_within_audio_for_every_rate() {
        let sentence = "Je m'appelle Marie.";
        let words = 3;
        for engine in [HostEngine::Espeak, HostEngine::SpeechDispatcher] {
            for rate in SpeechRate::ALL {
                let wpm = engine.words_per_minute(rate.value());
                let audio = Duration::from_millis(words * wpm_to_milliseconds(wpm));
                let pacing = pace_at_wpm(sentence, wpm, &PacingConfig::default());
                let (last, _) = pacing.boundaries.last().copied().unwrap();
                assert!(
                    last < audio,
                    "{:?} at {}: last word at {:?}, audio ends near {:?}",
                    engine,
                    rate,
                    last,
                    audio
                );
                // the last word starts after at least two words of audio
                assert!(last >= Duration::from_millis(2 * wpm_to_milliseconds(wpm)));
            }
        }
    }

    #[test]
    fn test_words_per_minute_matches_espeak_speed_arg() {
        for rate in SpeechRate::ALL {
            let request = SpeechRequest::french("Bonjour", rate.value(), 1.0);
            let args = HostEngine::Espeak.speak_args(&request);
            assert_eq!(args[3], HostEngine::Espeak.words_per_minute(rate.value()).to_string());
        }
        assert_eq!(HostEngine::Espeak.words_per_minute(0.25), 80);
        assert_eq!(HostEngine::Espeak.words_per_minute(1.0), 175);
    }

    #[test]
    fn test_espeak_args_clamp_slow_rate_and_use_voice() {
        let request = SpeechRequest::french("Bonjour", 0.25, 1.0).with_voice(Some(Voice {
            id: "fr-be".to_string(),
            name: "French (Belgium)".to_string(),
            language: "fr-be".to_string(),
        }));
        let args = HostEngine::Espeak.speak_args(&request);
        assert_eq!(args[1], "fr-be");
        assert_eq!(args[3], "80");
    }

    #[test]
    fn test_speech_dispatcher_args() {
        let request = SpeechRequest::french("Merci", 0.5, 1.0);
        let args = HostEngine::SpeechDispatcher.speak_args(&request);
        assert_eq!(args, vec!["-w", "-l", "fr", "-r", "-50", "-p", "0", "Merci"]);
    }

    #[test]
    fn test_parse_espeak_voices() {
        let output = "Pty Language       Age/Gender VoiceName          File                 Other Languages\n \
                      5  en-us           --/M      English_(America)  gmw/en-US\n \
                      5  fr-fr           --/M      French_(France)    roa/fr\n";
        let voices = HostEngine::Espeak.parse_voices(output);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].id, "fr-fr");
        assert_eq!(voices[1].name, "French (France)");
    }

    #[test]
    fn test_parse_speech_dispatcher_voices() {
        let output = "NAME                 LANGUAGE  VARIANT\nfrench               fr        none\n";
        let voices = HostEngine::SpeechDispatcher.parse_voices(output);
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].language, "fr");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut driver = CommandDriver::new(
            HostEngine::Espeak,
            Some("volala-no-such-program".to_string()),
            PacingConfig::default(),
        );
        assert!(!driver.is_available());
        assert!(driver.voices().is_empty());
        let result = driver.speak(
            SessionId::new(1),
            &SpeechRequest::french("Bonjour", 1.0, 1.0),
            tx,
        );
        assert!(result.unwrap_err().is_unsupported());
    }
}
