// Configuration for volala speech, storage and UI
// Loaded from ~/.config/volala/config.toml; every field has a default.

use crate::engine::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which speech driver to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EngineChoice {
    /// First host program found, or no speech at all.
    #[default]
    Auto,
    Espeak,
    SpeechDispatcher,
    /// No audio; word boundaries still advance on the pacing clock.
    Silent,
}

impl EngineChoice {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(EngineChoice::Auto),
            "espeak" | "espeak-ng" => Some(EngineChoice::Espeak),
            "speech-dispatcher" | "spd-say" => Some(EngineChoice::SpeechDispatcher),
            "silent" | "none" => Some(EngineChoice::Silent),
            _ => None,
        }
    }
}

/// Boundary clock used when the engine does not report word timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Words per minute at rate 1.0 (default 150)
    pub base_wpm: u32,

    /// Words longer than this many chars are held longer (default 10)
    pub long_word_threshold: usize,

    /// Hold multiplier for long words (default 1.15x)
    pub long_word_penalty: f64,

    /// Pause after `. ! ?`, in beats including the beat itself (default 3.0x)
    pub sentence_pause_multiplier: f64,

    /// Pause after `, ; :` (default 1.5x)
    pub clause_pause_multiplier: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_wpm: 150,
            long_word_threshold: 10,
            long_word_penalty: 1.15,
            sentence_pause_multiplier: 3.0,
            clause_pause_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub engine: EngineChoice,

    /// Program path overriding the engine's default binary.
    pub command: Option<String>,

    /// Voice pitch; 1.0 is the engine's normal pitch.
    pub pitch: f32,

    pub pacing: PacingConfig,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Auto,
            command: None,
            pitch: 1.0,
            pacing: PacingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the learner's data blob lives; defaults under the data dir.
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll interval in milliseconds (default 50)
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 50 }
    }
}

/// Local sign-in. `google_email` links a Google identity so `:google` works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub google_email: Option<String>,
    /// Display name for the linked account; defaults to the email's local part.
    pub google_name: Option<String>,
}

/// Master configuration combining all volala settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub speech: SpeechConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub auth: AuthConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Defaults when the file is missing; invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Applies `VOLALA_SPEECH_ENGINE`, `VOLALA_SPEECH_COMMAND` and
    /// `VOLALA_DATA_FILE` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(engine) = lookup("VOLALA_SPEECH_ENGINE") {
            match EngineChoice::parse(&engine) {
                Some(choice) => self.speech.engine = choice,
                None => log::warn!("ignoring unknown VOLALA_SPEECH_ENGINE={}", engine),
            }
        }

        if let Some(command) = lookup("VOLALA_SPEECH_COMMAND").filter(|c| !c.is_empty()) {
            self.speech.command = Some(command);
        }

        if let Some(path) = lookup("VOLALA_DATA_FILE").filter(|p| !p.is_empty()) {
            self.storage.data_file = Some(PathBuf::from(path));
        }

        self
    }

    /// ~/.config/volala/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("volala").join("config.toml"))
    }

    /// The configured data file, or ~/.local/share/volala/french-learner-data.json
    pub fn data_file(&self) -> Option<PathBuf> {
        self.storage.data_file.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("volala").join("french-learner-data.json"))
        })
    }
}
