pub mod command;
pub mod driver;
pub mod paced;
pub mod player;

pub use command::{CommandDriver, HostEngine};
pub use driver::{
    select_french_voice, BoundaryEvent, BoundaryName, SpeechDriver, SpeechError, SpeechEvent,
    SpeechEventKind, SpeechRequest, UnavailableDriver, Voice, PRONUNCIATION_RATE,
};
pub use paced::{pace, pace_at_wpm, wpm_to_milliseconds, PacedDriver, Pacing};
pub use player::Player;

use crate::engine::config::{EngineChoice, SpeechConfig};

/// Builds the driver named by the configuration.
///
/// `Auto` tries espeak-ng, then spd-say, and settles for an unavailable
/// driver so the app still runs without speech.
pub fn driver_from_config(config: &SpeechConfig) -> Box<dyn SpeechDriver> {
    let pacing = config.pacing.clone();
    match config.engine {
        EngineChoice::Silent => Box::new(PacedDriver::new(pacing)),
        EngineChoice::Espeak => Box::new(CommandDriver::new(
            HostEngine::Espeak,
            config.command.clone(),
            pacing,
        )),
        EngineChoice::SpeechDispatcher => Box::new(CommandDriver::new(
            HostEngine::SpeechDispatcher,
            config.command.clone(),
            pacing,
        )),
        EngineChoice::Auto => {
            for engine in [HostEngine::Espeak, HostEngine::SpeechDispatcher] {
                let driver = CommandDriver::new(engine, None, pacing.clone());
                if driver.is_available() {
                    return Box::new(driver);
                }
            }
            log::warn!("no speech program found; playback disabled");
            Box::new(UnavailableDriver)
        }
    }
}
