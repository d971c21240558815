//! TUI application - key handling over a Session
//!
//! The App owns the Session and translates key presses into session changes.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error};

use crate::catalog::CatalogIndex;
use crate::error::RosaryError;
use crate::session::Session;

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Steps,
    Help,
}

/// TUI application
#[derive(Debug)]
pub struct App {
    session: Session,
    pub mode: Mode,
    pub should_quit: bool,
    /// Last error, cleared on the next key press
    pub error_message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: Mode::default(),
            should_quit: false,
            error_message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Install the catalog once the background load finishes
    pub fn catalog_loaded(&mut self, catalog: CatalogIndex) {
        self.session.attach_catalog(catalog);
        self.error_message = None;
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        self.error_message = None;

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return true;
        }

        match self.mode {
            Mode::Steps => self.handle_steps_key(key),
            Mode::Help => self.handle_help_key(key),
        }
        self.should_quit
    }

    fn handle_steps_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.mode = Mode::Help;
                Ok(())
            }

            // === Step navigation ===
            KeyCode::Down | KeyCode::Char('n') => self.session.next_step(),
            KeyCode::Up | KeyCode::Char('N') => self.session.prev_step(),
            KeyCode::Home | KeyCode::Char('g') => {
                self.session.first_step();
                Ok(())
            }
            KeyCode::End | KeyCode::Char('G') => self.session.last_step(),

            // === Language ===
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.session.set_language("English");
                Ok(())
            }
            KeyCode::Char('j') | KeyCode::Char('J') => {
                self.session.set_language("Japanese");
                Ok(())
            }
            KeyCode::Char('l') => {
                self.session.cycle_language();
                Ok(())
            }

            _ => Ok(()),
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => {
                self.mode = Mode::Steps;
            }
            _ => {}
        }
    }

    fn report(&mut self, e: RosaryError) {
        error!("{}", e);
        self.error_message = Some(e.to_string());
    }
}
