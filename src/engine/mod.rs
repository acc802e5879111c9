pub mod config;
pub mod error;
pub mod logging;

pub use config::{AuthConfig, Config, EngineChoice, PacingConfig, SpeechConfig};
pub use error::{ConfigError, VolalaError};
