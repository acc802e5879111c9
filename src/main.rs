use log::{info, warn};
use volala::app::{App, AppState};
use volala::auth::LocalAuthProvider;
use volala::content::Catalog;
use volala::engine::{logging, Config, VolalaError};
use volala::speech::{driver_from_config, Player};
use volala::storage::{BlobStore, FileBlobStore, MemoryBlobStore};
use volala::ui::TuiManager;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run()?;
    Ok(())
}

fn run() -> Result<(), VolalaError> {
    let config = match Config::default_path() {
        Some(path) => Config::load_or_default(&path)?,
        None => Config::default(),
    }
    .with_env_overrides();

    logging::init(logging::default_log_path().as_deref())?;
    info!("starting volala");

    let catalog = Catalog::builtin()?;
    let store: Box<dyn BlobStore> = match config.data_file() {
        Some(path) => Box::new(FileBlobStore::new(path)),
        None => {
            warn!("no data directory; progress will not be kept");
            Box::new(MemoryBlobStore::default())
        }
    };
    let state = AppState::load(store);
    let player = Player::new(driver_from_config(&config.speech), config.speech.pitch);
    info!("speech driver: {}", player.driver_name());

    let auth = LocalAuthProvider::from_config(&config.auth);
    let mut app = App::new(catalog, state, player, Box::new(auth));
    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app, config.ui.tick_ms)?;

    Ok(())
}
