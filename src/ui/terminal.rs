use crate::app::{App, AppMode};
use crate::ui::render::draw;
use crate::ui::terminal_guard::TerminalGuard;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    // Dropped after the terminal so the screen is restored last.
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Runs until the app enters `AppMode::Quit`.
    ///
    /// Each pass waits up to `tick_ms` for a key, then lets the app drain
    /// speech events. A frame is drawn whenever something changed.
    pub fn run_event_loop(&mut self, app: &mut App, tick_ms: u64) -> io::Result<()> {
        let tick = Duration::from_millis(tick_ms.max(1));
        let mut last_tick = Instant::now();
        let mut dirty = true;

        loop {
            if dirty {
                self.render_frame(app)?;
                dirty = false;
            }
            if app.mode() == AppMode::Quit {
                log::info!("leaving event loop");
                return Ok(());
            }

            let timeout = tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                        dirty = true;
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick {
                if app.tick() {
                    dirty = true;
                }
                last_tick = Instant::now();
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        self.terminal.draw(|frame| draw(frame, app))?;
        Ok(())
    }
}
