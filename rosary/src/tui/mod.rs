//! Terminal viewer for the rosary
//!
//! Shows the numbered steps of the day with the focused step's text beside
//! them. Arrow keys (or n/N) move between steps, e/j switch language.

mod app;
mod events;
mod views;

pub use app::{App, Mode};
pub use events::{Event, EventHandler};

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::catalog::CatalogIndex;
use crate::error::RosaryError;
use crate::session::Session;

/// Background catalog load handed to the viewer
pub type CatalogLoader = JoinHandle<Result<CatalogIndex, RosaryError>>;

/// What woke the run loop
enum Wake {
    Loaded(Result<Result<CatalogIndex, RosaryError>, tokio::task::JoinError>),
    Input(Event),
}

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the viewer until the user quits
///
/// The session starts without a catalog; `loader` attaches it when done. A
/// failed load ends the viewer with that error.
pub async fn run(session: Session, loader: CatalogLoader, tick_rate: Duration) -> Result<()> {
    let mut terminal = init()?;

    // Use a guard to ensure terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    info!("Viewer started");
    let mut app = App::new(session);
    let mut events = EventHandler::new(tick_rate);

    let mut loader = Some(loader);

    terminal.draw(|frame| views::render(&app, frame))?;
    loop {
        let wake = match loader.as_mut() {
            Some(pending) => tokio::select! {
                joined = pending => Wake::Loaded(joined),
                event = events.next() => Wake::Input(event?),
            },
            None => Wake::Input(events.next().await?),
        };

        let event = match wake {
            Wake::Loaded(joined) => {
                loader = None;
                let index = joined
                    .context("Catalog loader stopped")?
                    .context("Failed to load catalog")?;
                app.catalog_loaded(index);
                terminal.draw(|frame| views::render(&app, frame))?;
                continue;
            }
            Wake::Input(event) => event,
        };

        let redraw = match event {
            Event::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
                true
            }
            Event::Resize(w, h) => {
                debug!(w, h, "run: resize");
                true
            }
            Event::Tick => false,
        };

        if redraw {
            terminal.draw(|frame| views::render(&app, frame))?;
        }
    }

    info!("Viewer stopped");
    Ok(())
}
