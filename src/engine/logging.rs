// File logging; the terminal belongs to the TUI so nothing goes to stderr.

use crate::engine::error::VolalaError;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const LOG_FILTER_ENV: &str = "VOLALA_LOG";

/// ~/.local/share/volala/volala.log on Linux
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("volala").join("volala.log"))
}

/// Routes `log` records to `path`, filtered by `VOLALA_LOG` (default `info`).
///
/// Without a path logging stays off.
pub fn init(path: Option<&Path>) -> Result<(), VolalaError> {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_FILTER_ENV, "info"));

    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| VolalaError::Logging(e.to_string()))
}
